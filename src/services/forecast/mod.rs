//! Forecast engine.
//!
//! Turns an ordered OHLCV bar sequence into a directional trading signal
//! with confidence, target price and supporting indicator values. Falls
//! back to a simulated forecast when real data is insufficient.

pub mod fallback;
pub mod indicators;
pub mod store;

pub use fallback::generate_fallback_forecast;
pub use store::ForecastStore;

use crate::types::{Forecast, PriceBar, PriceRange, Signal, Technicals};
use indicators::{calculate_rsi, calculate_sma, calculate_vwap, rsi};
use rand::Rng;
use tracing::debug;

/// Minimum bar count for a real forecast; anything less is served by the
/// fallback generator.
pub const MIN_BARS: usize = 20;

/// Fixed forecast horizon label.
pub const TIMEFRAME: &str = "1H";

/// Short moving-average window (closes).
const SMA_SHORT_WINDOW: usize = 30;

/// Long moving-average window (closes).
const SMA_LONG_WINDOW: usize = 120;

/// How many bars back the momentum comparison reaches.
const MOMENTUM_LOOKBACK: usize = 10;

/// Generate a forecast from real bar data, using the thread-local RNG for
/// the non-deterministic HOLD and fallback paths.
pub fn generate_forecast(bars: &[PriceBar], symbol: &str) -> Forecast {
    generate_forecast_with(bars, symbol, &mut rand::thread_rng())
}

/// Generate a forecast with an injected random source.
///
/// The BUY/SELL paths are fully deterministic; only the HOLD branch (no
/// clear signal) draws from `rng`, so seeded tests can pin down every
/// output.
pub fn generate_forecast_with<R: Rng>(bars: &[PriceBar], symbol: &str, rng: &mut R) -> Forecast {
    if bars.len() < MIN_BARS {
        debug!(
            "{} supplied {} bars, {} required; serving simulated forecast",
            symbol,
            bars.len(),
            MIN_BARS
        );
        return fallback::generate_fallback_forecast_with(symbol, rng);
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let Some(&current_price) = closes.last() else {
        return fallback::generate_fallback_forecast_with(symbol, rng);
    };

    let tail = |n: usize| &closes[closes.len().saturating_sub(n)..];

    let sma30 = calculate_sma(tail(SMA_SHORT_WINDOW));
    let sma120 = calculate_sma(tail(SMA_LONG_WINDOW));
    // A window of exactly DEFAULT_PERIOD closes leaves the oscillator at
    // its neutral default, so the overbought/oversold gates below never
    // veto a trend call on this horizon.
    let rsi_value = calculate_rsi(tail(rsi::DEFAULT_PERIOD), rsi::DEFAULT_PERIOD);
    let vwap = calculate_vwap(bars);

    let price_deviation = if vwap > 0.0 {
        ((current_price - vwap) / vwap) * 100.0
    } else {
        0.0
    };

    // Percentage divergence between the short and long averages
    let sma_trend = if sma120 > 0.0 {
        ((sma30 - sma120) / sma120) * 100.0
    } else {
        0.0
    };

    let momentum_base = closes[closes.len().saturating_sub(MOMENTUM_LOOKBACK)];
    let momentum = if momentum_base > 0.0 {
        ((current_price - momentum_base) / momentum_base) * 100.0
    } else {
        0.0
    };

    let (signal, confidence, target_price) =
        if sma30 > sma120 && rsi_value < 70.0 && momentum > 0.0 {
            let confidence = (50.0
                + sma_trend.abs() * 10.0
                + if momentum > 2.0 { 15.0 } else { 0.0 })
            .min(85.0);
            (
                Signal::Buy,
                confidence,
                current_price * (1.0 + confidence / 1000.0),
            )
        } else if sma30 < sma120 && rsi_value > 30.0 && momentum < 0.0 {
            let confidence = (50.0
                + sma_trend.abs() * 10.0
                + if momentum < -2.0 { 15.0 } else { 0.0 })
            .min(85.0);
            (
                Signal::Sell,
                confidence,
                current_price * (1.0 - confidence / 1000.0),
            )
        } else {
            // Sideways or conflicting indicators: low-conviction HOLD with
            // a small random perturbation around the current price
            let confidence = 40.0 + rng.gen::<f64>() * 20.0;
            let target = current_price * (0.99 + rng.gen::<f64>() * 0.02);
            (Signal::Hold, confidence, target)
        };

    Forecast {
        signal,
        confidence: confidence.round() as u8,
        current_price: round2(current_price),
        target_price: round2(target_price),
        price_range: PriceRange {
            min: round2(target_price * 0.985),
            max: round2(target_price * 1.015),
        },
        technicals: Technicals {
            sma30: round2(sma30),
            sma120: round2(sma120),
            rsi: round1(rsi_value),
            vwap: round2(vwap),
            price_deviation: round2(price_deviation),
        },
        timeframe: TIMEFRAME.to_string(),
        timestamp: chrono::Utc::now().timestamp_millis(),
        using_fallback: false,
        message: None,
    }
}

/// Round to 2 decimal places (monetary values, percentages).
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 1 decimal place (oscillator values).
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
