use serde::{Deserialize, Serialize};

/// Directional trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    /// Get display label for this signal.
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }
}

/// Expected price band around the target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Indicator values backing a forecast.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technicals {
    /// Short moving average (30 closes).
    pub sma30: f64,
    /// Long moving average (120 closes).
    pub sma120: f64,
    /// Relative Strength Index, 0-100.
    pub rsi: f64,
    /// Volume-weighted average price.
    pub vwap: f64,
    /// Percent deviation of the current price from VWAP.
    pub price_deviation: f64,
}

/// A trading forecast for one symbol.
///
/// Created fresh per request and never mutated. `using_fallback` marks
/// forecasts built from simulated data; `message` is only present on
/// that path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub signal: Signal,
    /// Confidence percentage, 0-100.
    pub confidence: u8,
    /// Last close (or synthetic base price on the fallback path).
    pub current_price: f64,
    pub target_price: f64,
    pub price_range: PriceRange,
    pub technicals: Technicals,
    /// Fixed horizon label, e.g. "1H".
    pub timeframe: String,
    /// Unix timestamp (milliseconds) when generated.
    pub timestamp: i64,
    pub using_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
