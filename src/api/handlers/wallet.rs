use axum::Json;
use axum::extract::State;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::types::{AddressRequest, AddressResponse, ConnectRequest};
use crate::wallet::{WalletSnapshot, validate_address};

pub async fn validate(Json(req): Json<AddressRequest>) -> Result<Json<AddressResponse>, ApiError> {
    let Some(address) = req.address.filter(|a| !a.is_empty()) else {
        return Err(ApiError::BadRequest("Invalid wallet address".into()));
    };
    let valid = validate_address(&address);
    let message = if valid {
        "Wallet address is valid"
    } else {
        "Invalid wallet address format"
    };
    Ok(Json(AddressResponse {
        valid,
        message: message.to_string(),
    }))
}

pub async fn connect(
    State(state): State<AppState>,
    Json(req): Json<ConnectRequest>,
) -> Result<Json<WalletSnapshot>, ApiError> {
    let mut wallet = state.inner.wallet.write().await;
    wallet
        .connect(&req.address, req.balances)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(Json(wallet.snapshot()))
}

pub async fn disconnect(State(state): State<AppState>) -> Json<WalletSnapshot> {
    let mut wallet = state.inner.wallet.write().await;
    wallet.disconnect();
    Json(wallet.snapshot())
}

pub async fn get(State(state): State<AppState>) -> Json<WalletSnapshot> {
    Json(state.inner.wallet.read().await.snapshot())
}
