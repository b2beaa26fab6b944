//! Client for the upstream happenings feed.
//!
//! Fetches founding events one bounded page at a time, paces itself
//! from the rate-limit telemetry the server returns, and parses the XML
//! feed into [`Founding`](founding_types::Founding) records.
//!
//! # Architecture
//!
//! ```text
//! fetch_range --> GET happenings --> RateBudget --> parse_foundings --> sleep --> Vec<Founding>
//! ```
//!
//! # Modules
//!
//! - [`budget`] -- Rate-limit telemetry and pacing delay
//! - [`client`] -- [`HappeningsClient`], the `reqwest` implementation
//! - [`config`] -- Environment-driven client configuration
//! - [`error`] -- [`ClientError`]
//! - [`parse`] -- Happenings document and founding sentence parsing
//! - [`source`] -- The [`FoundingSource`] seam used by the backfill engine

pub mod budget;
pub mod client;
pub mod config;
pub mod error;
pub mod parse;
pub mod source;

pub use budget::{RateBudget, backoff_delay};
pub use client::HappeningsClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use parse::{parse_founding_text, parse_foundings};
pub use source::{FoundingSource, PAGE_SIZE};
