use std::collections::HashSet;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;

use defi_canvas::signer::{Signer, SignerError, StaticSigner};
use defi_canvas::sim::executor::SIMULATED_FAILURE;
use defi_canvas::sim::market::{SOL_MINT, USDC_DEVNET_MINT};
use defi_canvas::sim::{
    ConfirmationPolicy, ExecutionError, ExecutionSimulator, FixedNoise, MarketTable, PricingConfig, PricingEngine,
    Quote, SimulatorConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

/// A wallet that never answers.
struct Offline;

#[async_trait]
impl Signer for Offline {
    fn public_key(&self) -> String {
        "offline".into()
    }

    async fn sign_message(&self, _message: &[u8]) -> Result<(), SignerError> {
        Err(SignerError::Unavailable("wallet not connected".into()))
    }

    async fn sign_and_submit(&self, _payload: &[u8]) -> Result<String, SignerError> {
        Err(SignerError::Unavailable("wallet not connected".into()))
    }
}

fn sol_quote() -> Quote {
    let mut pricing = PricingEngine::new(PricingConfig::default(), MarketTable::default(), FixedNoise::zero());
    pricing.quote(SOL_MINT, USDC_DEVNET_MINT, 1_000_000_000, 50).unwrap()
}

fn simulator(config: SimulatorConfig, seed: u64) -> ExecutionSimulator<StdRng> {
    ExecutionSimulator::new(config, MarketTable::default(), StdRng::seed_from_u64(seed))
}

fn instant() -> SimulatorConfig {
    SimulatorConfig::default().instant()
}

// ── Outcome distribution ────────────────────────────────────────────

#[tokio::test]
async fn failure_rate_is_wired() {
    let quote = sol_quote();
    let signer = StaticSigner::approving("tester");
    let mut sim = simulator(instant(), 42);

    const RUNS: usize = 10_000;
    let mut failures = 0;
    for _ in 0..RUNS {
        let result = sim.execute(&quote, Some(&signer)).await.unwrap();
        if !result.success {
            assert_eq!(result.error.as_deref(), Some(SIMULATED_FAILURE));
            assert!(result.signature.is_some());
            failures += 1;
        }
    }
    let rate = failures as f64 / RUNS as f64;
    assert!((0.04..=0.06).contains(&rate), "failure rate {rate}");
}

#[tokio::test]
async fn fills_stay_within_variance() {
    let quote = sol_quote();
    let signer = StaticSigner::approving("tester");
    let mut config = instant();
    config.failure_rate = 0.0;
    let mut sim = simulator(config, 3);

    for _ in 0..500 {
        let result = sim.execute(&quote, Some(&signer)).await.unwrap();
        assert!(result.success);
        let out = result.output_amount.unwrap() as f64;
        assert!((out / quote.out_amount as f64 - 1.0).abs() <= 0.005 + 1e-9);
        let slip = result.actual_slippage_pct.unwrap();
        assert!(slip.abs() <= 0.5 + 1e-6, "{slip}");
    }
}

#[tokio::test]
async fn signatures_are_unique() {
    let quote = sol_quote();
    let signer = StaticSigner::approving("tester");
    let mut sim = simulator(instant(), 9);

    let mut seen = HashSet::new();
    for _ in 0..200 {
        let sig = sim.execute(&quote, Some(&signer)).await.unwrap().signature.unwrap();
        assert!(sig.starts_with("sim_"));
        assert!(seen.insert(sig));
    }
}

#[tokio::test]
async fn always_fails_at_full_rate() {
    let mut config = instant();
    config.failure_rate = 1.0;
    let mut sim = simulator(config, 1);
    let result = sim
        .execute(&sol_quote(), Some(&StaticSigner::approving("t")))
        .await
        .unwrap();
    assert!(!result.success);
    assert!(result.output_amount.is_none());
}

// ── Confirmation ────────────────────────────────────────────────────

#[tokio::test]
async fn rejection_cancels_without_signature() {
    let mut sim = simulator(instant(), 5);
    let result = sim
        .execute(&sol_quote(), Some(&StaticSigner::rejecting("t")))
        .await
        .unwrap();
    assert!(!result.success);
    assert!(result.is_cancelled());
    assert!(result.signature.is_none());
}

#[tokio::test]
async fn rejection_cancels_even_with_auto_approve() {
    let mut config = instant();
    config.policy = ConfirmationPolicy::AutoApprove;
    let mut sim = simulator(config, 5);
    let result = sim
        .execute(&sol_quote(), Some(&StaticSigner::rejecting("t")))
        .await
        .unwrap();
    assert!(result.is_cancelled());
}

#[tokio::test]
async fn missing_signer_depends_on_policy() {
    let quote = sol_quote();

    let mut strict = simulator(instant(), 5);
    assert_eq!(strict.execute(&quote, None).await.unwrap_err(), ExecutionError::MissingSigner);

    let mut config = instant();
    config.policy = ConfirmationPolicy::AutoApprove;
    config.failure_rate = 0.0;
    let mut auto = simulator(config, 5);
    assert!(auto.execute(&quote, None).await.unwrap().success);
}

#[tokio::test]
async fn unavailable_signer_depends_on_policy() {
    let quote = sol_quote();

    let mut strict = simulator(instant(), 5);
    assert!(strict.execute(&quote, Some(&Offline)).await.unwrap().is_cancelled());

    let mut config = instant();
    config.policy = ConfirmationPolicy::AutoApprove;
    config.failure_rate = 0.0;
    let mut auto = simulator(config, 5);
    assert!(auto.execute(&quote, Some(&Offline)).await.unwrap().success);
}

#[tokio::test]
async fn malformed_quote_is_an_error() {
    let mut quote = sol_quote();
    quote.in_amount = 0;
    let mut sim = simulator(instant(), 5);
    assert!(matches!(
        sim.execute(&quote, Some(&StaticSigner::approving("t"))).await,
        Err(ExecutionError::MalformedQuote(_))
    ));

    let mut quote = sol_quote();
    quote.minimum_out_amount = quote.out_amount + 1;
    assert!(sim.execute(&quote, Some(&StaticSigner::approving("t"))).await.is_err());
}

#[tokio::test]
async fn waits_for_confirmation_delay() {
    let mut config = SimulatorConfig::default();
    config.min_confirmation = Duration::from_millis(20);
    config.max_confirmation = Duration::from_millis(20);
    let mut sim = simulator(config, 5);

    let started = Instant::now();
    sim.execute(&sol_quote(), Some(&StaticSigner::approving("t")))
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(20));
}

#[test]
fn confirmation_message_names_both_tokens() {
    let sim = simulator(instant(), 5);
    let msg = sim.confirmation_message(&sol_quote());
    assert!(msg.starts_with("Confirm Swap"));
    assert!(msg.contains("1 SOL"));
    assert!(msg.contains("USDC"));
    assert!(msg.contains("Slippage: 0.5%"));
    assert!(msg.contains("simulated"));
}
