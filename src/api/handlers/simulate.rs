use axum::Json;
use axum::extract::State;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::types::SimulateRequest;
use crate::model::WorkflowGraph;
use crate::run::{RunError, RunReport, simulate_workflow};
use crate::signer::{Signer, StaticSigner};
use crate::validate::validate;

/// Simulate the workflow's swap step. The stand-in signer answers with the
/// request's `approve` flag. A connected wallet is settled on success.
pub async fn simulate(
    State(state): State<AppState>,
    Json(req): Json<SimulateRequest>,
) -> Result<Json<RunReport>, ApiError> {
    let graph = WorkflowGraph::from_parts(req.nodes, req.edges).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let inner = &state.inner;

    let public_key = inner
        .wallet
        .read()
        .await
        .address()
        .unwrap_or("simulator")
        .to_string();
    let signer = if req.approve {
        StaticSigner::approving(public_key)
    } else {
        StaticSigner::rejecting(public_key)
    };

    let mut pricing = inner.pricing_engine(req.seed);
    let mut simulator = inner.execution_simulator(req.seed);
    let report = simulate_workflow(&graph, &mut pricing, &mut simulator, Some(&signer as &dyn Signer))
        .await
        .map_err(|e| match e {
            RunError::Invalid(_) => ApiError::Validation(validate(&graph).report()),
            RunError::Execution(e) => ApiError::Internal(e.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        })?;

    let mut wallet = inner.wallet.write().await;
    if wallet.is_connected()
        && let Err(e) = wallet.apply_swap(&report.quote, &report.result)
    {
        tracing::warn!(error = %e, "could not settle simulated swap against wallet");
    }

    Ok(Json(report))
}
