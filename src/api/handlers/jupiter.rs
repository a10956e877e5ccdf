//! Pass-through proxy to the Jupiter API so browsers avoid CORS issues.

use axum::Json;
use axum::extract::{Query, State};
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::types::ClusterQuery;

pub async fn quote(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.inner.jupiter.quote_raw(&query).await?))
}

pub async fn swap(
    State(state): State<AppState>,
    Query(q): Query<ClusterQuery>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.inner.jupiter.swap_raw(&body, q.cluster.as_deref()).await?))
}

pub async fn tokens(State(state): State<AppState>, Query(q): Query<ClusterQuery>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.inner.jupiter.tokens(q.cluster.as_deref()).await?))
}
