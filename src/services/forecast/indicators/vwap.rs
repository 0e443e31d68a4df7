//! Volume Weighted Average Price (VWAP) indicator.

use crate::types::PriceBar;

/// Average close price weighted by traded volume over all supplied bars.
///
/// VWAP = sum(close * volume) / sum(volume), counting only bars that
/// actually traded (`volume > 0`). When no volume was traded at all the
/// last bar's close is returned so callers never divide by zero; this is
/// a degenerate fallback, not an error.
pub fn calculate_vwap(bars: &[PriceBar]) -> f64 {
    let mut total_volume = 0.0;
    let mut total_volume_price = 0.0;

    for bar in bars {
        if bar.volume > 0.0 {
            total_volume += bar.volume;
            total_volume_price += bar.close * bar.volume;
        }
    }

    if total_volume > 0.0 {
        total_volume_price / total_volume
    } else {
        bars.last().map(|b| b.close).unwrap_or(0.0)
    }
}
