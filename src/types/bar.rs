use serde::{Deserialize, Serialize};

/// One OHLCV observation of an instrument.
///
/// Sequences handed to the forecast engine are chronological ascending
/// (oldest first); callers guarantee the ordering, the engine does not
/// re-sort. A validated bar always has a finite, positive close and a
/// non-negative volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    /// Unix timestamp in seconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    /// Whether this bar is safe to feed into indicator math.
    pub fn is_valid(&self) -> bool {
        self.close.is_finite() && self.close > 0.0 && self.volume >= 0.0
    }
}
