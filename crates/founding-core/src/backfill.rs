//! Day backfill: one complete calendar day of foundings per call.
//!
//! The upstream feed returns at most [`PAGE_SIZE`] events per request,
//! newest first. A day is collected by walking backward from the end of
//! the day: each full page moves the `before` cursor to the oldest
//! timestamp just seen, and the first short page ends the walk.
//!
//! The feed treats `sincetime` as exclusive, so the walk starts one
//! second before midnight to include events stamped exactly 00:00:00.
//! Records that fall outside the day are dropped, which keeps each
//! founding in exactly one day whichever way the bounds are read.
//!
//! A day is written to the cache only after the walk finishes and only
//! once the day is over. A failed fetch mid-walk leaves the cache
//! untouched, and today's partial list is always refetched.

use chrono::{DateTime, TimeDelta, Utc};
use founding_cache::{CacheError, DayCache};
use founding_client::{ClientError, FoundingSource, PAGE_SIZE};
use founding_types::{Day, Founding};
use tracing::{debug, info};

use crate::clock::Clock;

/// Errors that abort a day's backfill.
#[derive(Debug, thiserror::Error)]
pub enum BackfillError {
    /// A page fetch failed.
    #[error("fetching foundings for {day} failed: {source}")]
    Fetch {
        /// The day being backfilled.
        day: Day,
        /// The underlying client error.
        source: ClientError,
    },

    /// The completed day could not be written to the cache.
    #[error("caching foundings for {day} failed: {source}")]
    Cache {
        /// The day being backfilled.
        day: Day,
        /// The underlying cache error.
        source: CacheError,
    },

    /// A full page did not move the cursor backward, so the next request
    /// would repeat the last one.
    #[error("pagination for {day} stalled at {before}")]
    Stalled {
        /// The day being backfilled.
        day: Day,
        /// The cursor that failed to advance.
        before: DateTime<Utc>,
    },
}

/// Collects complete days of foundings from a source, through a cache.
#[derive(Debug)]
pub struct DayBackfill<S, C, K> {
    source: S,
    cache: C,
    clock: K,
}

impl<S, C, K> DayBackfill<S, C, K>
where
    S: FoundingSource,
    C: DayCache,
    K: Clock,
{
    /// Create a backfill engine.
    pub const fn new(source: S, cache: C, clock: K) -> Self {
        Self {
            source,
            cache,
            clock,
        }
    }

    /// The founding source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The day cache.
    pub const fn cache(&self) -> &C {
        &self.cache
    }

    /// The clock.
    pub const fn clock(&self) -> &K {
        &self.clock
    }

    /// All foundings on `day`, newest first.
    ///
    /// Served from the cache when the day has been completed before;
    /// otherwise fetched page by page and, if the day is over, cached.
    ///
    /// # Errors
    ///
    /// Returns [`BackfillError`] if any page fetch fails, pagination
    /// stalls, or the finished day cannot be cached. Nothing is cached
    /// in any of these cases.
    pub async fn get_day(&self, day: Day) -> Result<Vec<Founding>, BackfillError> {
        if let Some(cached) = self.cache.get(day) {
            debug!(%day, foundings = cached.len(), "day served from cache");
            return Ok(cached);
        }

        let since = day
            .start()
            .checked_sub_signed(TimeDelta::seconds(1))
            .unwrap_or_else(|| day.start());
        let mut before = day.end();
        let mut foundings = Vec::new();
        let mut pages: usize = 0;

        loop {
            let page = self
                .source
                .fetch_range(since, before)
                .await
                .map_err(|source| BackfillError::Fetch { day, source })?;
            pages = pages.saturating_add(1);

            let full = page.len() >= PAGE_SIZE;
            let Some(oldest) = page.last().map(|f| f.time) else {
                break;
            };
            foundings.extend(page.into_iter().filter(|f| Day::containing(f.time) == day));

            if !full {
                break;
            }
            if oldest >= before {
                return Err(BackfillError::Stalled { day, before });
            }
            before = oldest;
        }

        let complete = day.end() < self.clock.now();
        if complete {
            self.cache
                .set(day, &foundings)
                .map_err(|source| BackfillError::Cache { day, source })?;
        }

        info!(
            %day,
            foundings = foundings.len(),
            pages,
            cached = complete,
            "day backfilled"
        );

        Ok(foundings)
    }
}
