use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::jupiter::JupiterError;
use crate::store::StoreError;
use crate::validate::Report;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// The workflow failed validation; the body is the full report.
    Validation(Report),
    /// The upstream aggregator failed or answered with an error.
    Upstream(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Validation(report) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::to_value(report).unwrap_or_else(|e| json!({ "error": e.to_string() })),
            ),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, json!({ "error": msg })),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Graph(e) => ApiError::BadRequest(e.to_string()),
            StoreError::Invalid(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JupiterError> for ApiError {
    fn from(err: JupiterError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(format!("{:#}", err))
    }
}
