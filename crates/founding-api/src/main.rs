//! Founding rates server binary.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from the environment
//! 3. Build the happenings client and the on-disk day cache
//! 4. Assemble the window aggregator behind shared state
//! 5. Warm the cache in the background
//! 6. Serve the JSON endpoints until `Ctrl-C`

use std::sync::Arc;

use founding_api::{ApiConfig, AppState, FoundingsQuery, LiveState, start_server};
use founding_cache::FsDayCache;
use founding_client::HappeningsClient;
use founding_core::{DayBackfill, SystemClock, WindowAggregator};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the HTTP client cannot
/// be built, or the server fails to bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("founding-rates starting");

    // 2. Load configuration.
    let config = ApiConfig::from_env()?;
    info!(
        api_url = config.client.api_url,
        user_agent = config.client.user_agent,
        min_delay_ms = config.client.min_delay.as_millis(),
        cache_dir = %config.cache_dir.display(),
        window_days = config.window_days,
        "Configuration loaded"
    );

    // 3. Upstream client and day cache.
    let client = HappeningsClient::new(&config.client)?;
    let cache = FsDayCache::new(config.cache_dir.clone());

    // 4. Window aggregator.
    let backfill = DayBackfill::new(client, cache, SystemClock);
    let aggregator = WindowAggregator::new(backfill, config.window_days);
    let state: Arc<LiveState> = Arc::new(AppState::new(aggregator));

    // 5. Warm the cache so the first request does not pay for the backfill.
    let warm_state = Arc::clone(&state);
    tokio::spawn(async move {
        match warm_state.recent_foundings().await {
            Ok(foundings) => info!(foundings = foundings.len(), "window warmed"),
            Err(e) => warn!(error = %e, "window warm-up failed"),
        }
    });

    // 6. Serve.
    start_server(&config.server, state).await?;

    info!("founding-rates shutdown complete");
    Ok(())
}
