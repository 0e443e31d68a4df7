//! Finnhub API client for historical candle data.
//!
//! Fetches OHLCV candles and converts the provider's parallel-array
//! payload into validated [`PriceBar`] sequences before anything reaches
//! the indicator math.

use crate::error::{AppError, Result};
use crate::types::PriceBar;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const FINNHUB_URL: &str = "https://finnhub.io/api/v1";

/// Candle resolution used for forecasting (minutes).
pub const CANDLE_RESOLUTION: &str = "60";

/// How far back the candle fetch reaches (seconds).
pub const CANDLE_LOOKBACK_SECS: i64 = 7 * 24 * 60 * 60;

/// The `[from, to]` window for a candle fetch ending now.
pub fn candle_window(now_secs: i64) -> (i64, i64) {
    (now_secs - CANDLE_LOOKBACK_SECS, now_secs)
}

/// Finnhub candle response: parallel arrays plus a status flag.
///
/// `s` is `"ok"` on success, `"no_data"` or `"error"` otherwise, in which
/// case the arrays may be missing entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandleResponse {
    #[serde(rename = "s", default)]
    pub status: String,
    #[serde(rename = "c", default)]
    pub close: Vec<f64>,
    #[serde(rename = "o", default)]
    pub open: Vec<f64>,
    #[serde(rename = "h", default)]
    pub high: Vec<f64>,
    #[serde(rename = "l", default)]
    pub low: Vec<f64>,
    #[serde(rename = "t", default)]
    pub time: Vec<i64>,
    #[serde(rename = "v", default)]
    pub volume: Vec<f64>,
}

impl CandleResponse {
    /// Whether the payload carries usable candles.
    pub fn is_ok(&self) -> bool {
        self.status == "ok" && !self.close.is_empty()
    }

    /// Convert into validated bars, oldest first.
    ///
    /// Entries with a non-finite or non-positive close are dropped;
    /// missing or malformed open/high/low values fall back to the close,
    /// and bad volumes are clamped to 0 so they are simply excluded from
    /// VWAP.
    pub fn into_bars(self) -> Vec<PriceBar> {
        let mut bars = Vec::with_capacity(self.close.len());

        for (i, &close) in self.close.iter().enumerate() {
            if !close.is_finite() || close <= 0.0 {
                continue;
            }

            let field = |values: &[f64]| {
                values
                    .get(i)
                    .copied()
                    .filter(|v| v.is_finite() && *v > 0.0)
                    .unwrap_or(close)
            };

            let volume = self
                .volume
                .get(i)
                .copied()
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(0.0);

            bars.push(PriceBar {
                time: self.time.get(i).copied().unwrap_or(0),
                open: field(&self.open),
                high: field(&self.high),
                low: field(&self.low),
                close,
                volume,
            });
        }

        bars
    }
}

/// Finnhub API client.
pub struct FinnhubClient {
    client: Client,
    api_key: String,
}

impl FinnhubClient {
    /// Create a new Finnhub client with a per-request timeout.
    pub fn new(api_key: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, api_key }
    }

    /// Fetch candles for a symbol over `[from, to]` (Unix seconds).
    pub async fn get_candles(
        &self,
        symbol: &str,
        resolution: &str,
        from: i64,
        to: i64,
    ) -> Result<CandleResponse> {
        let url = format!(
            "{}/stock/candle?symbol={}&resolution={}&from={}&to={}&token={}",
            FINNHUB_URL, symbol, resolution, from, to, self.api_key
        );

        debug!("fetching candles for {} ({} resolution)", symbol, resolution);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "candle request for {} returned {}",
                symbol,
                response.status()
            )));
        }

        Ok(response.json::<CandleResponse>().await?)
    }
}
