//! Forecast API endpoints.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::error::AppError;
use crate::types::Forecast;
use crate::AppState;

/// API response wrapper.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Serialize)]
pub struct ApiMeta {
    pub cached: bool,
}

/// Create the forecast router.
pub fn router() -> Router<AppState> {
    Router::new().route("/:symbol", get(get_forecast))
}

/// Get a forecast for a symbol.
///
/// Never fails for missing market data; simulated forecasts come back on
/// the same 200 path, flagged via `usingFallback`.
async fn get_forecast(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<Forecast>>, AppError> {
    let symbol = symbol.trim().to_string();
    if symbol.is_empty() {
        return Err(AppError::BadRequest("symbol must not be empty".to_string()));
    }

    let cached = state.forecast_store.is_cached(&symbol);
    let forecast = state.forecast_store.get_forecast(&symbol).await;

    Ok(Json(ApiResponse {
        data: forecast,
        meta: ApiMeta { cached },
    }))
}
