use axum::Json;
use axum::extract::State;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::model::{GraphDocument, WorkflowGraph};
use crate::validate::{self, Report};

pub(crate) fn graph_from(doc: GraphDocument) -> Result<WorkflowGraph, ApiError> {
    WorkflowGraph::try_from(doc).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Findings are data: an invalid workflow still answers 200 with `valid: false`.
pub async fn validate_workflow(
    State(_state): State<AppState>,
    Json(doc): Json<GraphDocument>,
) -> Result<Json<Report>, ApiError> {
    let graph = graph_from(doc)?;
    Ok(Json(validate::validate(&graph).report()))
}
