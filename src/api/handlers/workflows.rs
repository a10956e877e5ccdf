use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::model::{NewWorkflow, Workflow, WorkflowPatch};

fn not_found() -> ApiError {
    ApiError::NotFound("Workflow not found".into())
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Workflow>>, ApiError> {
    Ok(Json(state.inner.store.list()?))
}

pub async fn get_one(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Workflow>, ApiError> {
    state.inner.store.get(id)?.map(Json).ok_or_else(not_found)
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewWorkflow>,
) -> Result<(StatusCode, Json<Workflow>), ApiError> {
    let saved = state.inner.store.create(req)?;
    tracing::info!(id = saved.id, name = %saved.name, "workflow saved");
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<WorkflowPatch>,
) -> Result<Json<Workflow>, ApiError> {
    state.inner.store.update(id, patch)?.map(Json).ok_or_else(not_found)
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    if state.inner.store.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}
