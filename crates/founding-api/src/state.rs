//! Shared application state for the query server.
//!
//! [`AppState`] owns the window aggregator. The handlers only see it
//! through [`FoundingsQuery`], so tests can serve the router from an
//! in-memory cache and a scripted source.

use std::future::Future;

use founding_cache::{DayCache, FsDayCache};
use founding_client::{FoundingSource, HappeningsClient};
use founding_core::{Clock, SystemClock, WindowAggregator, WindowError};
use founding_types::{Founding, RegionCount, WindowSummary};
use tokio::sync::Mutex;

/// The state served in production.
pub type LiveState = AppState<HappeningsClient, FsDayCache, SystemClock>;

/// The data products the query endpoints serve.
pub trait FoundingsQuery: Send + Sync + 'static {
    /// Every founding in the window, newest first.
    fn recent_foundings(
        &self,
    ) -> impl Future<Output = Result<Vec<Founding>, WindowError>> + Send;

    /// Foundings per region, most active first.
    fn region_counts(&self) -> impl Future<Output = Result<Vec<RegionCount>, WindowError>> + Send;

    /// Sample size and time span of the window.
    fn summary(&self) -> impl Future<Output = Result<WindowSummary, WindowError>> + Send;
}

/// Application state: the window aggregator behind an async mutex.
///
/// The mutex is held for the whole of each window walk, so requests
/// never fetch from upstream concurrently.
#[derive(Debug)]
pub struct AppState<S, C, K> {
    aggregator: Mutex<WindowAggregator<S, C, K>>,
}

impl<S, C, K> AppState<S, C, K> {
    /// Wrap an aggregator for serving.
    pub fn new(aggregator: WindowAggregator<S, C, K>) -> Self {
        Self {
            aggregator: Mutex::new(aggregator),
        }
    }
}

impl<S, C, K> FoundingsQuery for AppState<S, C, K>
where
    S: FoundingSource + Send + Sync + 'static,
    C: DayCache + Send + Sync + 'static,
    K: Clock + Send + Sync + 'static,
{
    async fn recent_foundings(&self) -> Result<Vec<Founding>, WindowError> {
        let aggregator = self.aggregator.lock().await;
        aggregator.recent_foundings().await
    }

    async fn region_counts(&self) -> Result<Vec<RegionCount>, WindowError> {
        let aggregator = self.aggregator.lock().await;
        aggregator.region_counts().await
    }

    async fn summary(&self) -> Result<WindowSummary, WindowError> {
        let aggregator = self.aggregator.lock().await;
        aggregator.summary().await
    }
}
