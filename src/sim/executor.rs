use std::time::Duration;

use rand::Rng;
use rand::distr::Alphanumeric;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::signer::{Signer, SignerError};

use super::market::MarketTable;
use super::pricing::Quote;

pub const CANCELLED: &str = "cancelled by user";
pub const SIMULATED_FAILURE: &str = "simulated transaction failure";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("malformed quote: {0}")]
    MalformedQuote(String),

    #[error("no signer available to confirm the transaction")]
    MissingSigner,
}

/// What to do when no signer can be asked for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfirmationPolicy {
    /// A missing signer is an error and an unavailable one cancels the run.
    #[default]
    RequireSigner,
    /// Proceed without confirmation when no signer can be reached.
    /// An explicit rejection still cancels.
    AutoApprove,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Probability in `[0, 1]` that a confirmed transaction fails.
    pub failure_rate: f64,
    pub min_confirmation: Duration,
    pub max_confirmation: Duration,
    /// Max relative deviation of the filled amount from the quote.
    pub variance: f64,
    pub policy: ConfirmationPolicy,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            failure_rate: 0.05,
            min_confirmation: Duration::from_secs(2),
            max_confirmation: Duration::from_secs(4),
            variance: 0.005,
            policy: ConfirmationPolicy::RequireSigner,
        }
    }
}

impl SimulatorConfig {
    /// Same odds, no confirmation delay.
    pub fn instant(mut self) -> Self {
        self.min_confirmation = Duration::ZERO;
        self.max_confirmation = Duration::ZERO;
        self
    }
}

/// Outcome of a simulated swap. Cancellations and failures are outcomes,
/// not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_amount: Option<u64>,
    /// Positive when the fill came in below the quote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_slippage_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn filled(signature: String, output_amount: u64, actual_slippage_pct: f64) -> Self {
        Self {
            success: true,
            signature: Some(signature),
            output_amount: Some(output_amount),
            actual_slippage_pct: Some(actual_slippage_pct),
            error: None,
        }
    }

    pub fn failed(signature: Option<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            signature,
            output_amount: None,
            actual_slippage_pct: None,
            error: Some(error.into()),
        }
    }

    pub fn cancelled() -> Self {
        Self::failed(None, CANCELLED)
    }

    pub fn is_cancelled(&self) -> bool {
        self.error.as_deref() == Some(CANCELLED)
    }
}

/// Mock execution of quoted swaps: confirm, wait, then fill or fail.
pub struct ExecutionSimulator<R: Rng + Send> {
    config: SimulatorConfig,
    market: MarketTable,
    rng: R,
}

impl<R: Rng + Send> ExecutionSimulator<R> {
    pub fn new(config: SimulatorConfig, market: MarketTable, rng: R) -> Self {
        Self { config, market, rng }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Message shown to the user before the swap is "sent".
    pub fn confirmation_message(&self, quote: &Quote) -> String {
        let input = self.market.symbol(&quote.input_mint);
        let output = self.market.symbol(&quote.output_mint);
        let in_decimals = self.market.decimals(&quote.input_mint) as i32;
        let out_decimals = self.market.decimals(&quote.output_mint) as i32;
        let in_ui = quote.in_amount as f64 / 10f64.powi(in_decimals);
        let out_ui = quote.out_amount as f64 / 10f64.powi(out_decimals);
        format!(
            "Confirm Swap\n\n{in_ui} {input} → ~{out_ui:.6} {output}\n\nSlippage: {}%\n\nThis is a simulated transaction.",
            f64::from(quote.slippage_bps) / 100.0
        )
    }

    fn check_quote(quote: &Quote) -> Result<(), ExecutionError> {
        if quote.in_amount == 0 {
            return Err(ExecutionError::MalformedQuote("zero input amount".to_string()));
        }
        if quote.input_mint == quote.output_mint {
            return Err(ExecutionError::MalformedQuote("identical mints".to_string()));
        }
        if quote.minimum_out_amount > quote.out_amount {
            return Err(ExecutionError::MalformedQuote(
                "minimum output exceeds quoted output".to_string(),
            ));
        }
        Ok(())
    }

    /// Ask the signer. `Ok(false)` means the run is cancelled.
    async fn confirm(&self, quote: &Quote, signer: Option<&dyn Signer>) -> Result<bool, ExecutionError> {
        let auto = self.config.policy == ConfirmationPolicy::AutoApprove;
        let Some(signer) = signer else {
            return if auto { Ok(true) } else { Err(ExecutionError::MissingSigner) };
        };

        let message = self.confirmation_message(quote);
        match signer.sign_message(message.as_bytes()).await {
            Ok(()) => Ok(true),
            Err(SignerError::Rejected) => {
                tracing::warn!(signer = %signer.public_key(), "swap rejected by signer");
                Ok(false)
            }
            Err(SignerError::Unavailable(reason)) => {
                tracing::warn!(%reason, auto_approve = auto, "signer unavailable");
                Ok(auto)
            }
        }
    }

    fn signature(&mut self) -> String {
        let suffix: String = (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();
        format!("sim_{}_{}", chrono::Utc::now().timestamp_millis(), suffix)
    }

    fn confirmation_delay(&mut self) -> Duration {
        let min = self.config.min_confirmation.as_millis() as u64;
        let max = self.config.max_confirmation.as_millis() as u64;
        if max <= min {
            return Duration::from_millis(min);
        }
        Duration::from_millis(self.rng.random_range(min..=max))
    }

    /// Execute `quote` against the mock market.
    ///
    /// Only a malformed quote or a missing signer (without auto-approve) is an
    /// `Err`; rejection and random failure come back as unsuccessful results.
    pub async fn execute(
        &mut self,
        quote: &Quote,
        signer: Option<&dyn Signer>,
    ) -> Result<ExecutionResult, ExecutionError> {
        Self::check_quote(quote)?;

        if !self.confirm(quote, signer).await? {
            return Ok(ExecutionResult::cancelled());
        }

        // Every random draw happens before the wait.
        let signature = self.signature();
        let delay = self.confirmation_delay();
        let roll: f64 = self.rng.random();
        let variance = self.config.variance.abs();
        let deviation: f64 = if variance > 0.0 {
            self.rng.random_range(-variance..=variance)
        } else {
            0.0
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if roll < self.config.failure_rate {
            tracing::info!(%signature, "simulated swap failed");
            return Ok(ExecutionResult::failed(Some(signature), SIMULATED_FAILURE));
        }

        let quoted = quote.out_amount;
        let actual = (quoted as f64 * (1.0 + deviation)).floor().max(0.0) as u64;
        let slippage_pct = if quoted == 0 {
            0.0
        } else {
            (quoted as f64 - actual as f64) / quoted as f64 * 100.0
        };

        tracing::info!(%signature, quoted, actual, slippage_pct, "simulated swap filled");
        Ok(ExecutionResult::filled(signature, actual, slippage_pct))
    }
}
