//! Shared type definitions for the founding rates tracker.
//!
//! Every crate in the workspace speaks in these types: the parser
//! produces [`Founding`] records, the day cache stores them keyed by
//! [`Day`], and the aggregation layer derives [`RegionCount`] values.
//!
//! # Modules
//!
//! - [`structs`] -- Founding records, region counts, and window summaries
//! - [`day`] -- UTC calendar day boundaries and cache keys

pub mod day;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use day::Day;
pub use structs::{Founding, RegionCount, WindowSummary};
