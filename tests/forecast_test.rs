/**
 * Forecast Engine Tests
 *
 * End-to-end scenarios for the forecast pipeline:
 * - Trending, declining and sideways markets
 * - Fallback behavior on short or missing data
 * - Numeric invariants of every output field
 */
use augur::services::forecast::fallback::{generate_fallback_forecast_with, FALLBACK_MESSAGE};
use augur::services::forecast::{generate_forecast_with, ForecastStore, MIN_BARS};
use augur::types::{PriceBar, Signal};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Build an hourly bar sequence from closes, constant volume.
fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            time: 1_700_000_000 + i as i64 * 3600,
            open: close,
            high: close + 0.25,
            low: close - 0.25,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// 150 closes moving linearly from `start` to `end`.
fn linear_closes(start: f64, end: f64) -> Vec<f64> {
    let step = (end - start) / 149.0;
    (0..150).map(|i| start + step * i as f64).collect()
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn rising_market_produces_buy_at_confidence_cap() {
    let bars = bars_from_closes(&linear_closes(100.0, 115.0));
    let forecast = generate_forecast_with(&bars, "AAPL", &mut rng(1));

    assert_eq!(forecast.signal, Signal::Buy);
    assert!(!forecast.using_fallback);
    assert!(forecast.message.is_none());
    assert!(forecast.technicals.sma30 > forecast.technicals.sma120);
    assert_eq!(forecast.confidence, 85);
    assert_eq!(forecast.current_price, 115.0);
    assert!(forecast.target_price > forecast.current_price);
    assert!(forecast.price_range.min <= forecast.target_price);
    assert!(forecast.price_range.max >= forecast.target_price);
    // Price sits above the volume-weighted average in a steady climb
    assert!(forecast.technicals.price_deviation > 0.0);
}

#[test]
fn falling_market_produces_sell() {
    let bars = bars_from_closes(&linear_closes(115.0, 100.0));
    let forecast = generate_forecast_with(&bars, "AAPL", &mut rng(1));

    assert_eq!(forecast.signal, Signal::Sell);
    assert!(!forecast.using_fallback);
    assert!(forecast.technicals.sma30 < forecast.technicals.sma120);
    assert_eq!(forecast.confidence, 85);
    assert!(forecast.target_price < forecast.current_price);
    assert!(forecast.technicals.price_deviation < 0.0);
}

#[test]
fn flat_market_produces_hold() {
    let bars = bars_from_closes(&[100.0; 150]);
    let forecast = generate_forecast_with(&bars, "AAPL", &mut rng(1));

    assert_eq!(forecast.signal, Signal::Hold);
    assert!((40..=60).contains(&forecast.confidence));
    // No gains, no losses: neutral oscillator
    assert_eq!(forecast.technicals.rsi, 50.0);
    // Constant price and volume: VWAP equals the price exactly
    assert_eq!(forecast.technicals.vwap, 100.0);
    assert_eq!(forecast.technicals.price_deviation, 0.0);
    assert_eq!(forecast.technicals.sma30, forecast.technicals.sma120);
}

#[test]
fn short_history_falls_back() {
    let bars = bars_from_closes(&linear_closes(100.0, 115.0)[..MIN_BARS - 1]);
    let forecast = generate_forecast_with(&bars, "AAPL", &mut rng(1));

    assert!(forecast.using_fallback);
    assert_eq!(forecast.message.as_deref(), Some(FALLBACK_MESSAGE));
    assert!(forecast.confidence <= 100);
    assert!(forecast.price_range.min <= forecast.price_range.max);
    assert!(forecast.current_price > 0.0);
}

#[test]
fn exactly_min_bars_is_sufficient() {
    let closes: Vec<f64> = (0..MIN_BARS).map(|i| 100.0 + i as f64).collect();
    let bars = bars_from_closes(&closes);
    let forecast = generate_forecast_with(&bars, "AAPL", &mut rng(1));
    assert!(!forecast.using_fallback);
}

#[test]
fn empty_bars_for_btc_use_btc_scale() {
    let forecast = generate_forecast_with(&[], "BTC/USD", &mut rng(1));

    assert!(forecast.using_fallback);
    assert_eq!(forecast.current_price, 45_000.0);
    assert!(forecast.target_price >= 45_000.0 * 0.95);
    assert!(forecast.target_price <= 45_000.0 * 1.05);
}

#[test]
fn fallback_invariants_hold_across_seeds() {
    for seed in 0..100 {
        let forecast = generate_fallback_forecast_with("NVDA", &mut rng(seed));

        assert!(forecast.using_fallback);
        assert!((50..80).contains(&forecast.confidence));
        assert!(forecast.price_range.min <= forecast.price_range.max);
        assert!(forecast.technicals.sma30 > 0.0);
        assert!(forecast.technicals.sma120 > 0.0);
        assert!(forecast.technicals.rsi >= 0.0 && forecast.technicals.rsi <= 100.0);
        assert_eq!(forecast.timeframe, "1H");
    }
}

#[test]
fn forecast_serializes_like_the_wire_format() {
    let bars = bars_from_closes(&linear_closes(100.0, 115.0));
    let forecast = generate_forecast_with(&bars, "AAPL", &mut rng(1));

    let json = serde_json::to_value(&forecast).unwrap();
    assert_eq!(json["signal"], "BUY");
    assert_eq!(json["timeframe"], "1H");
    assert_eq!(json["usingFallback"], false);
    assert!(json["technicals"]["priceDeviation"].is_number());
    assert!(json["priceRange"]["min"].is_number());
    assert!(json.get("message").is_none());
}

#[tokio::test]
async fn store_without_provider_serves_simulated_forecasts() {
    let store = ForecastStore::new(None, 30_000);

    let forecast = store.get_forecast("TSLA").await;
    assert!(forecast.using_fallback);
    assert_eq!(forecast.current_price, 200.0);

    // Second request inside the TTL is served from cache
    let again = store.get_forecast("TSLA").await;
    assert_eq!(forecast.timestamp, again.timestamp);
    assert_eq!(forecast.target_price, again.target_price);
}

#[tokio::test]
async fn store_treats_symbols_case_insensitively() {
    let store = ForecastStore::new(None, 30_000);
    let first = store.get_forecast("eth-usd").await;
    let second = store.get_forecast("ETH-USD").await;
    assert_eq!(first.current_price, 2_500.0);
    assert_eq!(first.timestamp, second.timestamp);
}
