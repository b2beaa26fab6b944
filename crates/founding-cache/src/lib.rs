//! Day-bucketed cache of founding records.
//!
//! A day is only ever cached once its backfill has fully completed, so
//! an entry always holds the complete list of foundings for that day.
//! Entries are keyed by the UTC start-of-day instant and pruned once
//! the day falls out of the retention window.
//!
//! # Architecture
//!
//! ```text
//! Backfill engine
//!     |
//!     +-- get(day) --------> hit: full day / miss: refetch
//!     +-- set(day, list) --> write temp file, fsync, rename
//!     +-- prune(cutoff) ---> delete days before cutoff and garbage names
//! ```
//!
//! # Modules
//!
//! - [`store`] -- The [`DayCache`] trait
//! - [`fs`] -- [`FsDayCache`], one JSON file per day
//! - [`memory`] -- [`MemoryDayCache`] for tests and ephemeral runs
//! - [`error`] -- Shared error types

pub mod error;
pub mod fs;
pub mod memory;
pub mod store;

// Re-export primary types for convenience.
pub use error::CacheError;
pub use fs::FsDayCache;
pub use memory::MemoryDayCache;
pub use store::DayCache;
