use std::env;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Finnhub API key for candle data. When absent, every forecast is
    /// served from the simulated fallback path.
    pub finnhub_api_key: Option<String>,
    /// How long a computed forecast stays fresh (ms).
    pub forecast_cache_ttl_ms: i64,
    /// Timeout for upstream candle requests (seconds).
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            finnhub_api_key: env::var("FINNHUB_API_KEY").ok(),
            forecast_cache_ttl_ms: env::var("FORECAST_CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30_000),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
