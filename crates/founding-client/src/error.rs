//! Error types for the happenings client.
//!
//! Every failure here aborts the page being fetched. Nothing is retried
//! at this layer; callers decide whether to retry a whole day.

/// Errors that can occur while fetching or parsing a page of foundings.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request failed or timed out.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream feed answered with a non-success status.
    #[error("upstream returned {status}: {body}")]
    Status {
        /// HTTP status code returned.
        status: reqwest::StatusCode,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The upstream feed rejected the request for exceeding its rate limit.
    #[error("rate limited by upstream (retry after {retry_after:?} seconds)")]
    RateLimited {
        /// Seconds to wait before the next request, if the server said.
        retry_after: Option<u64>,
    },

    /// The response was not a well-formed happenings document.
    #[error("malformed happenings document: {0}")]
    Parse(String),

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),
}
