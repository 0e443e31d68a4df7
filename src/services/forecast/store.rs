//! Forecast store: orchestration and caching.
//!
//! Fetches candle history from the provider, runs the forecast engine and
//! caches the result per symbol. Every failure mode along the way (no
//! provider, upstream error, unusable payload, too few bars) degrades to
//! a simulated forecast; `get_forecast` never fails.

use crate::error::Result;
use crate::services::forecast::{generate_fallback_forecast, generate_forecast};
use crate::sources::finnhub::{candle_window, FinnhubClient, CANDLE_RESOLUTION};
use crate::types::Forecast;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Cache entry for a computed forecast.
struct CachedForecast {
    forecast: Forecast,
    computed_at: i64,
}

/// Store for computing and caching forecasts.
pub struct ForecastStore {
    /// Candle provider; absent when no API key is configured.
    provider: Option<Arc<FinnhubClient>>,
    /// Cache keyed by lowercased symbol.
    cache: DashMap<String, CachedForecast>,
    /// Cache TTL in milliseconds.
    cache_ttl_ms: i64,
}

impl ForecastStore {
    /// Create a new forecast store.
    pub fn new(provider: Option<Arc<FinnhubClient>>, cache_ttl_ms: i64) -> Arc<Self> {
        Arc::new(Self {
            provider,
            cache: DashMap::new(),
            cache_ttl_ms,
        })
    }

    /// Get a forecast for a symbol, from cache when fresh.
    ///
    /// Infallible by design: upstream problems are logged and answered
    /// with a simulated forecast instead of an error.
    pub async fn get_forecast(&self, symbol: &str) -> Forecast {
        let key = symbol.to_lowercase();
        let now = chrono::Utc::now().timestamp_millis();

        if let Some(cached) = self.cache.get(&key) {
            if now - cached.computed_at < self.cache_ttl_ms {
                return cached.forecast.clone();
            }
        }

        let forecast = match self.compute(symbol).await {
            Ok(forecast) => forecast,
            Err(e) => {
                warn!("forecast for {} failed ({}); serving simulated data", symbol, e);
                generate_fallback_forecast(symbol)
            }
        };

        debug!(
            "{} -> {} ({}%){}",
            symbol,
            forecast.signal.label(),
            forecast.confidence,
            if forecast.using_fallback { " [simulated]" } else { "" }
        );

        self.cache.insert(
            key,
            CachedForecast {
                forecast: forecast.clone(),
                computed_at: now,
            },
        );

        forecast
    }

    /// Whether a fresh forecast for this symbol is currently cached.
    pub fn is_cached(&self, symbol: &str) -> bool {
        let key = symbol.to_lowercase();
        let now = chrono::Utc::now().timestamp_millis();
        self.cache
            .get(&key)
            .map(|cached| now - cached.computed_at < self.cache_ttl_ms)
            .unwrap_or(false)
    }

    /// Fetch candles and run the engine.
    async fn compute(&self, symbol: &str) -> Result<Forecast> {
        let Some(ref provider) = self.provider else {
            debug!("no candle provider configured for {}", symbol);
            return Ok(generate_fallback_forecast(symbol));
        };

        let (from, to) = candle_window(chrono::Utc::now().timestamp());
        let response = provider
            .get_candles(symbol, CANDLE_RESOLUTION, from, to)
            .await?;

        if !response.is_ok() {
            debug!("provider returned no usable candles for {}", symbol);
            return Ok(generate_fallback_forecast(symbol));
        }

        let bars = response.into_bars();
        debug!("fetched {} usable bars for {}", bars.len(), symbol);

        Ok(generate_forecast(&bars, symbol))
    }

    /// Drop the cached forecast for a symbol.
    pub fn invalidate(&self, symbol: &str) {
        self.cache.remove(&symbol.to_lowercase());
    }

    /// Drop all cached forecasts.
    pub fn invalidate_all(&self) {
        self.cache.clear();
    }
}
