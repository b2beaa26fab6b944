//! Configuration for the founding rates binary.
//!
//! Loaded from environment variables. Every variable is optional; the
//! defaults track the public NationStates API with a seven-day window
//! cached under `.cache`.

use std::path::PathBuf;

use founding_client::{ClientConfig, ClientError};
use founding_core::DEFAULT_WINDOW_DAYS;

use crate::server::ServerConfig;

/// Default on-disk location of the day cache.
const DEFAULT_CACHE_DIR: &str = ".cache";

/// Complete binary configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Where the query server listens.
    pub server: ServerConfig,
    /// Upstream client settings.
    pub client: ClientConfig,
    /// Directory holding one cache file per finished day.
    pub cache_dir: PathBuf,
    /// Number of days before today included in the window.
    pub window_days: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            client: ClientConfig::default(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables, besides those read by
    /// [`ClientConfig::from_env`]:
    /// - `FOUNDINGS_CACHE_DIR` -- day cache directory (default `.cache`)
    /// - `FOUNDINGS_WINDOW_DAYS` -- window length in days (default 7)
    /// - `FOUNDINGS_HOST` -- bind host (default `0.0.0.0`)
    /// - `FOUNDINGS_PORT` -- listen port (default 8080)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let client = ClientConfig::from_env()?;
        let cache_dir = std::env::var("FOUNDINGS_CACHE_DIR")
            .map_or(defaults.cache_dir, PathBuf::from);
        let window_days = match std::env::var("FOUNDINGS_WINDOW_DAYS") {
            Ok(raw) => parse_window_days(&raw)?,
            Err(_) => defaults.window_days,
        };
        let host = std::env::var("FOUNDINGS_HOST").unwrap_or(defaults.server.host);
        let port = match std::env::var("FOUNDINGS_PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("invalid FOUNDINGS_PORT: {e}")))?,
            Err(_) => defaults.server.port,
        };

        Ok(Self {
            server: ServerConfig { host, port },
            client,
            cache_dir,
            window_days,
        })
    }
}

/// Parse a window length. Zero days would leave only today.
fn parse_window_days(raw: &str) -> Result<u64, ConfigError> {
    let days: u64 = raw
        .trim()
        .parse()
        .map_err(|e| ConfigError::Invalid(format!("invalid FOUNDINGS_WINDOW_DAYS: {e}")))?;
    if days == 0 {
        return Err(ConfigError::Invalid(
            "FOUNDINGS_WINDOW_DAYS must be positive".to_owned(),
        ));
    }
    Ok(days)
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was present but could not be used.
    #[error("configuration error: {0}")]
    Invalid(String),

    /// The upstream client settings were rejected.
    #[error(transparent)]
    Client(#[from] ClientError),
}
