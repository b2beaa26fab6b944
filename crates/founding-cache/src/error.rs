//! Error types for the day cache.
//!
//! Only writes and pruning can fail. Reads that hit a missing or corrupt
//! entry are reported as misses so the caller simply refetches the day.

/// Errors that can occur while writing or pruning the day cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// A filesystem operation failed.
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A day's foundings could not be serialized.
    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
