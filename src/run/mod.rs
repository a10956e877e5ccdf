pub mod live;
pub mod request;

use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;

use crate::engine::{TraversalError, action_plan};
use crate::model::WorkflowGraph;
use crate::signer::{PromptSigner, Signer, StaticSigner};
use crate::sim::{
    ExecutionError, ExecutionResult, ExecutionSimulator, MarketNoise, MarketTable, PricingConfig, PricingEngine,
    PricingError, Quote, RngNoise, SimulatorConfig,
};
use crate::validate::{ValidationError, validate};

pub use live::{LiveError, execute_live_swap};
pub use request::{PlanError, SwapRequest};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("workflow is invalid ({} error(s))", .0.len())]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Traversal(#[from] TraversalError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("no swap step found in workflow")]
    NoSwapStep,

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Everything that happened when a workflow's swap step was simulated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub node_id: String,
    pub label: String,
    pub request: SwapRequest,
    pub quote: Quote,
    pub result: ExecutionResult,
}

/// Validate, plan, quote the first swap-type step, then simulate it.
pub async fn simulate_workflow<N, R>(
    graph: &WorkflowGraph,
    pricing: &mut PricingEngine<N>,
    simulator: &mut ExecutionSimulator<R>,
    signer: Option<&dyn Signer>,
) -> Result<RunReport, RunError>
where
    N: MarketNoise,
    R: Rng + Send,
{
    let validation = validate(graph);
    if !validation.valid() {
        return Err(RunError::Invalid(validation.errors));
    }

    let plan = action_plan(graph)?;
    let step = plan
        .into_iter()
        .find(|s| s.action_type.is_swap())
        .ok_or(RunError::NoSwapStep)?;

    let request = SwapRequest::from_config(&step.node_id, step.action_type, &step.config, pricing.market())?;
    let quote = pricing.quote(
        &request.input_mint,
        &request.output_mint,
        request.amount,
        request.slippage_bps,
    )?;
    let result = simulator.execute(&quote, signer).await?;

    Ok(RunReport {
        node_id: step.node_id,
        label: step.label,
        request,
        quote,
        result,
    })
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

// ── CLI entry points ─────────────────────────────────────────────────

/// Options of the `simulate` subcommand.
pub struct SimulateOptions {
    pub seed: Option<u64>,
    pub yes: bool,
    pub failure_rate: Option<f64>,
}

/// Entry point for the `simulate` command.
pub fn simulate(path: &Path, opts: &SimulateOptions) -> Result<()> {
    let loaded = crate::validate::load(path)
        .with_context(|| format!("loading workflow from {}", path.display()))?;

    let market = MarketTable::default();
    let mut sim_config = SimulatorConfig::default();
    if let Some(rate) = opts.failure_rate {
        sim_config.failure_rate = rate.clamp(0.0, 1.0);
    }

    // Separate streams so a seed reproduces both quote and execution.
    let mut pricing = PricingEngine::new(
        PricingConfig::default(),
        market.clone(),
        RngNoise::new(rng_for(opts.seed)),
    );
    let mut simulator = ExecutionSimulator::new(sim_config, market, rng_for(opts.seed.map(|s| s ^ 0x5157)));

    let signer: Box<dyn Signer> = if opts.yes {
        Box::new(StaticSigner::approving("cli"))
    } else {
        Box::new(PromptSigner::new("cli"))
    };

    println!("=== defi-canvas simulate ===");
    println!(
        "Workflow: {} ({} nodes, {} edges)",
        loaded.name.as_deref().unwrap_or("(unnamed)"),
        loaded.graph.node_count(),
        loaded.graph.edge_count()
    );

    let rt = tokio::runtime::Runtime::new().context("creating tokio runtime")?;
    let report = rt.block_on(simulate_workflow(
        &loaded.graph,
        &mut pricing,
        &mut simulator,
        Some(signer.as_ref()),
    ));

    let report = match report {
        Ok(r) => r,
        Err(RunError::Invalid(errors)) => {
            eprintln!("Validation failed with {} error(s):", errors.len());
            for (i, e) in errors.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, e);
            }
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    println!("Step:     {} ({})", report.label, report.node_id);
    println!(
        "Quote:    {} -> {} (impact {:.3}%, fee {}, min out {})",
        report.quote.in_amount,
        report.quote.out_amount,
        report.quote.price_impact_pct,
        report.quote.fee_amount,
        report.quote.minimum_out_amount
    );
    let r = &report.result;
    if r.success {
        println!("Result:   filled {}", r.output_amount.unwrap_or_default());
        println!("Slippage: {:.4}%", r.actual_slippage_pct.unwrap_or_default());
        println!("Tx:       {}", r.signature.as_deref().unwrap_or("-"));
    } else {
        println!("Result:   {}", r.error.as_deref().unwrap_or("failed"));
    }
    Ok(())
}

/// Entry point for the `quote` command. `amount` is in whole tokens.
pub fn quote(input: &str, output: &str, amount: f64, slippage_bps: u16, seed: Option<u64>) -> Result<()> {
    let market = MarketTable::default();
    let resolve = |token: &str| match market.resolve(token) {
        Some(t) => (t.mint.clone(), t.decimals),
        None => (token.to_string(), crate::sim::market::DEFAULT_DECIMALS),
    };
    let (input_mint, decimals) = resolve(input);
    let (output_mint, out_decimals) = resolve(output);
    let base_units = crate::sim::market::to_base_units(amount, decimals);

    let mut pricing = PricingEngine::new(PricingConfig::default(), market.clone(), RngNoise::new(rng_for(seed)));
    let q = pricing.quote(&input_mint, &output_mint, base_units, slippage_bps)?;

    let scale = 10f64.powi(out_decimals as i32);
    println!("{} {} -> {} {}", amount, market.symbol(&input_mint), q.out_amount as f64 / scale, market.symbol(&output_mint));
    println!("{}", serde_json::to_string_pretty(&q)?);
    Ok(())
}
