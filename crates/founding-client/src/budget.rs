//! Rate-limit telemetry and request pacing.
//!
//! The happenings feed reports how many requests remain in the current
//! window and how long until that window resets. Spreading the remaining
//! requests evenly over the reset time keeps a sequential caller under
//! the server's limit. A configured minimum delay acts as the floor, and
//! is the whole delay whenever telemetry is missing.

use std::time::Duration;

use reqwest::header::HeaderMap;

/// Header carrying the requests left in the current window.
pub const REMAINING_HEADER: &str = "ratelimit-remaining";

/// Header carrying the seconds until the current window resets.
pub const RESET_HEADER: &str = "ratelimit-reset";

/// Header carrying the seconds to wait after a 429 response.
pub const RETRY_AFTER_HEADER: &str = "retry-after";

/// Rate-limit telemetry read from a single response.
///
/// Transient: read once per response, turned into a delay, then dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateBudget {
    /// Requests left in the current window, if reported.
    pub remaining: Option<u64>,
    /// Seconds until the window resets, if reported.
    pub reset_seconds: Option<u64>,
}

impl RateBudget {
    /// Read the budget from response headers.
    ///
    /// Absent or non-numeric headers become `None`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            remaining: header_u64(headers, REMAINING_HEADER),
            reset_seconds: header_u64(headers, RESET_HEADER),
        }
    }

    /// Whether both telemetry values were reported.
    pub const fn is_complete(&self) -> bool {
        self.remaining.is_some() && self.reset_seconds.is_some()
    }

    /// Delay to wait before the next request.
    ///
    /// - `remaining > 0`: `reset / remaining`, at least `min_delay`
    /// - `remaining == 0`: the full reset time, at least `min_delay`
    /// - missing telemetry: `min_delay`
    pub fn pacing_delay(&self, min_delay: Duration) -> Duration {
        let (Some(remaining), Some(reset_seconds)) = (self.remaining, self.reset_seconds) else {
            return min_delay;
        };

        let reset = Duration::from_secs(reset_seconds);
        let spacing = match u32::try_from(remaining) {
            Ok(0) => reset,
            Ok(n) => reset.checked_div(n).unwrap_or(min_delay),
            // More requests left than fit in a u32: effectively unlimited.
            Err(_) => Duration::ZERO,
        };

        spacing.max(min_delay)
    }
}

/// Delay after a 429 response: the server's `Retry-After`, or the
/// pacing delay if that is longer.
pub fn backoff_delay(budget: &RateBudget, retry_after: Option<u64>, min_delay: Duration) -> Duration {
    let requested = retry_after.map_or(Duration::ZERO, Duration::from_secs);
    requested.max(budget.pacing_delay(min_delay))
}

/// Parse a header as a non-negative integer.
pub fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
