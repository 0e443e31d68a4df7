//! Relative Strength Index (RSI) indicator.

/// Default lookback period.
pub const DEFAULT_PERIOD: usize = 14;

/// RSI over a chronological price sequence.
///
/// Measures momentum by comparing the magnitude of recent gains to recent
/// losses. Values range from 0-100:
/// - Below 30: oversold
/// - Above 70: overbought
///
/// Uses a simple average of the last `period` bar-to-bar changes, not
/// Wilder's smoothing. Returns 50.0 (neutral) when fewer than
/// `period + 1` prices are supplied; insufficient data is a default, not
/// an error. A window with no movement at all is also neutral, while
/// gains with zero losses saturate at 100.
pub fn calculate_rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return 50.0;
    }

    let mut gains = Vec::with_capacity(prices.len() - 1);
    let mut losses = Vec::with_capacity(prices.len() - 1);

    for pair in prices.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(-change);
        }
    }

    // Simple average over the most recent `period` changes
    let avg_gain: f64 = gains.iter().rev().take(period).sum::<f64>() / period as f64;
    let avg_loss: f64 = losses.iter().rev().take(period).sum::<f64>() / period as f64;

    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
