//! The rolling window of recent foundings.
//!
//! Walks from today back to the cutoff day (`window_days` before today,
//! inclusive), backfilling each day in turn, newest day first. Once the
//! walk completes, cache entries older than the cutoff are pruned.
//!
//! The whole window succeeds or fails together. Region counts computed
//! from a window with a missing day would be misleading, so a failed day
//! fails the call instead of being skipped.

use chrono::{DateTime, Utc};
use founding_cache::DayCache;
use founding_client::FoundingSource;
use founding_types::{Day, Founding, RegionCount, WindowSummary};
use tracing::{info, warn};

use crate::analysis::{region_counts, summarize};
use crate::backfill::{BackfillError, DayBackfill};
use crate::clock::Clock;

/// Days before today covered by the window, by default.
pub const DEFAULT_WINDOW_DAYS: u64 = 7;

/// Errors that prevent a window from being assembled.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    /// One of the window's days could not be backfilled.
    #[error(transparent)]
    Backfill(#[from] BackfillError),

    /// The window start falls outside the representable calendar.
    #[error("window of {window_days} days before {now} is out of range")]
    OutOfRange {
        /// The instant the window was anchored at.
        now: DateTime<Utc>,
        /// Configured window length.
        window_days: u64,
    },
}

/// Assembles the rolling window from per-day backfills.
#[derive(Debug)]
pub struct WindowAggregator<S, C, K> {
    backfill: DayBackfill<S, C, K>,
    window_days: u64,
}

impl<S, C, K> WindowAggregator<S, C, K>
where
    S: FoundingSource,
    C: DayCache,
    K: Clock,
{
    /// Create an aggregator over `window_days` full days before today.
    pub const fn new(backfill: DayBackfill<S, C, K>, window_days: u64) -> Self {
        Self {
            backfill,
            window_days,
        }
    }

    /// The underlying backfill engine.
    pub const fn backfill(&self) -> &DayBackfill<S, C, K> {
        &self.backfill
    }

    /// Configured window length in days before today.
    pub const fn window_days(&self) -> u64 {
        self.window_days
    }

    /// Days in the window anchored at `now`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::OutOfRange`] if the cutoff day does not exist.
    pub fn days(&self, now: DateTime<Utc>) -> Result<Vec<Day>, WindowError> {
        let out_of_range = || WindowError::OutOfRange {
            now,
            window_days: self.window_days,
        };

        let today = Day::containing(now);
        let cutoff = today.minus_days(self.window_days).ok_or_else(out_of_range)?;

        let mut days = vec![today];
        let mut day = today;
        while day > cutoff {
            day = day.previous().ok_or_else(out_of_range)?;
            days.push(day);
        }
        Ok(days)
    }

    /// All foundings from now back through the cutoff day, newest day
    /// first, then prune cache entries older than the cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError`] if any day fails to backfill. Nothing is
    /// pruned in that case.
    pub async fn recent_foundings(&self) -> Result<Vec<Founding>, WindowError> {
        let now = self.backfill.clock().now();
        let days = self.days(now)?;

        let mut foundings = Vec::new();
        for &day in &days {
            foundings.extend(self.backfill.get_day(day).await?);
        }

        if let Some(&cutoff) = days.last() {
            match self.backfill.cache().prune(cutoff) {
                Ok(pruned) => info!(
                    days = days.len(),
                    foundings = foundings.len(),
                    %cutoff,
                    pruned,
                    "window assembled"
                ),
                // Stale entries are only wasted space; the window itself is complete.
                Err(e) => warn!(%cutoff, error = %e, "failed to prune day cache"),
            }
        }

        Ok(foundings)
    }

    /// Foundings per region over the window, most active first.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError`] if the window cannot be assembled.
    pub async fn region_counts(&self) -> Result<Vec<RegionCount>, WindowError> {
        Ok(region_counts(&self.recent_foundings().await?))
    }

    /// Sample size and time span of the window.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError`] if the window cannot be assembled.
    pub async fn summary(&self) -> Result<WindowSummary, WindowError> {
        let foundings = self.recent_foundings().await?;
        Ok(summarize(&foundings, self.backfill.clock().now()))
    }
}
