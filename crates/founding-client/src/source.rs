//! The seam between the backfill engine and the upstream feed.
//!
//! [`FoundingSource`] is implemented by [`HappeningsClient`] in
//! production and by scripted sources in tests.
//!
//! [`HappeningsClient`]: crate::client::HappeningsClient

use std::future::Future;

use chrono::{DateTime, Utc};
use founding_types::Founding;

use crate::error::ClientError;

/// Maximum number of events the upstream feed returns per request.
///
/// A page of exactly this size means more events may remain in the range.
pub const PAGE_SIZE: usize = 200;

/// A source of founding events, one bounded page at a time.
pub trait FoundingSource {
    /// Fetch up to [`PAGE_SIZE`] foundings after `since` and up to
    /// `before`, newest first.
    ///
    /// Implementations issue exactly one upstream request and handle any
    /// rate-limit pacing before resolving.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, status, or document failures.
    fn fetch_range(
        &self,
        since: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<Founding>, ClientError>> + Send;
}
