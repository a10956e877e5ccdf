use thiserror::Error;

use crate::jupiter::{JupiterClient, JupiterError, QuoteParams};
use crate::signer::{Signer, SignerError};
use crate::sim::{ExecutionResult, MarketTable};

use super::request::SwapRequest;

const LIVE_CLUSTER: &str = "devnet";

#[derive(Debug, Error)]
pub enum LiveError {
    #[error("`{mint}` is a mainnet token; live swaps run on devnet only")]
    MainnetMint { mint: String },

    #[error(transparent)]
    Jupiter(#[from] JupiterError),
}

/// Refuse mints that only exist on mainnet.
pub fn check_devnet(request: &SwapRequest, market: &MarketTable) -> Result<(), LiveError> {
    for mint in [&request.input_mint, &request.output_mint] {
        if market.is_mainnet_only(mint) {
            return Err(LiveError::MainnetMint { mint: mint.clone() });
        }
    }
    Ok(())
}

/// Run a real swap through Jupiter: quote, build the transaction for the
/// signer's key, then hand the payload to the signer to sign and submit.
///
/// A rejected signature is a cancelled result, not an error.
pub async fn execute_live_swap(
    client: &JupiterClient,
    market: &MarketTable,
    request: &SwapRequest,
    signer: &dyn Signer,
) -> Result<ExecutionResult, LiveError> {
    check_devnet(request, market)?;

    let params = QuoteParams {
        input_mint: request.input_mint.clone(),
        output_mint: request.output_mint.clone(),
        amount: request.amount,
        slippage_bps: request.slippage_bps,
        cluster: Some(LIVE_CLUSTER.to_string()),
    };
    let quote = client.quote(&params).await?;
    let out_amount = quote
        .get("outAmount")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<u64>().ok());

    let tx = client.swap(&quote, &signer.public_key(), LIVE_CLUSTER).await?;
    tracing::info!(
        input = %request.input_mint,
        output = %request.output_mint,
        amount = request.amount,
        cluster = LIVE_CLUSTER,
        "submitting live swap"
    );

    match signer.sign_and_submit(tx.swap_transaction.as_bytes()).await {
        Ok(signature) => Ok(ExecutionResult {
            success: true,
            signature: Some(signature),
            output_amount: out_amount,
            actual_slippage_pct: None,
            error: None,
        }),
        Err(SignerError::Rejected) => Ok(ExecutionResult::cancelled()),
        Err(SignerError::Unavailable(reason)) => {
            tracing::warn!(%reason, "signer unavailable for live swap");
            Ok(ExecutionResult::failed(None, reason))
        }
    }
}
