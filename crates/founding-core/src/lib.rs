//! Data-acquisition pipeline for the founding rates tracker.
//!
//! Stitches bounded, rate-limited page fetches into complete calendar
//! days, caches finished days, and walks a rolling window of days to
//! produce the recent founding history and per-region counts.
//!
//! # Control flow
//!
//! ```text
//! WindowAggregator --> DayBackfill --> FoundingSource (fetch + pace + parse)
//!                          |
//!                          +--> DayCache (get / set / prune)
//! ```
//!
//! Everything runs as a single sequential flow: one request in flight at
//! a time, because the fetcher's post-request delay is what keeps the
//! caller inside the upstream rate budget.
//!
//! # Modules
//!
//! - [`analysis`] -- Region counts and window summaries
//! - [`backfill`] -- [`DayBackfill`], one complete day per call
//! - [`clock`] -- [`Clock`] trait with system and fixed implementations
//! - [`window`] -- [`WindowAggregator`] over the rolling window
//!
//! [`DayBackfill`]: backfill::DayBackfill
//! [`Clock`]: clock::Clock
//! [`WindowAggregator`]: window::WindowAggregator

pub mod analysis;
pub mod backfill;
pub mod clock;
pub mod window;

#[cfg(test)]
mod testing;

pub use analysis::{region_counts, summarize};
pub use backfill::{BackfillError, DayBackfill};
pub use clock::{Clock, FixedClock, SystemClock};
pub use window::{DEFAULT_WINDOW_DAYS, WindowAggregator, WindowError};
