use augur::config::Config;
use augur::services::ForecastStore;
use augur::sources::FinnhubClient;
use augur::{api, AppState};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "augur=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting augur server on {}:{}", config.host, config.port);

    // Create the candle provider (optional)
    let provider = config.finnhub_api_key.as_ref().map(|api_key| {
        info!("Finnhub API key found, live candle data enabled");
        Arc::new(FinnhubClient::new(
            api_key.clone(),
            Duration::from_secs(config.request_timeout_secs),
        ))
    });
    if provider.is_none() {
        info!("No candle provider configured; all forecasts will use simulated data");
    }

    let forecast_store = ForecastStore::new(provider, config.forecast_cache_ttl_ms);

    let state = AppState {
        config: config.clone(),
        forecast_store,
    };

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = api::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("augur server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
