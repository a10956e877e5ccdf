use axum::Json;
use axum::extract::State;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::types::PreviewResponse;
use crate::engine::build_preview;
use crate::model::GraphDocument;

use super::validate::graph_from;

pub async fn preview(
    State(_state): State<AppState>,
    Json(doc): Json<GraphDocument>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let graph = graph_from(doc)?;
    let steps = build_preview(&graph).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let message = steps
        .is_empty()
        .then(|| "No executable actions found".to_string());
    Ok(Json(PreviewResponse { steps, message }))
}
