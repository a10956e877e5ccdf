use axum::Json;
use axum::extract::State;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::types::QuoteRequest;
use crate::sim::Quote;

pub async fn quote(State(state): State<AppState>, Json(req): Json<QuoteRequest>) -> Result<Json<Quote>, ApiError> {
    let inner = &state.inner;
    let mint = |token: &str| {
        inner
            .market
            .resolve(token)
            .map_or_else(|| token.trim().to_string(), |t| t.mint.clone())
    };
    let input = mint(&req.input_mint);
    let output = mint(&req.output_mint);

    let mut engine = inner.pricing_engine(req.seed);
    let quote = engine
        .quote(&input, &output, req.amount, req.slippage_bps)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(Json(quote))
}
