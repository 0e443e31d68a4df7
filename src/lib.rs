//! Augur - market forecast server
//!
//! Serves heuristic trading forecasts built from classic technical
//! indicators (SMA, RSI, VWAP) over hourly candle data, with a simulated
//! fallback when live market data is unavailable.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use config::Config;
use services::ForecastStore;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub forecast_store: Arc<ForecastStore>,
}

// Re-export commonly used types
pub use types::{Forecast, PriceBar, PriceRange, Signal, Technicals};
