//! Configuration for the happenings client.
//!
//! All values come from environment variables with defaults suitable for
//! the public NationStates API. The user agent is mandatory upstream
//! etiquette and may be overridden but never left empty.

use std::time::Duration;

use crate::error::ClientError;

/// Default happenings endpoint.
pub const DEFAULT_API_URL: &str = "https://www.nationstates.net/cgi-bin/api.cgi";

/// Default descriptive client identifier.
pub const DEFAULT_USER_AGENT: &str = "NationStates Founding Rates";

/// Default per-request timeout in milliseconds.
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Default minimum spacing between requests: 50 requests per 30 seconds.
const DEFAULT_MIN_DELAY_MS: u64 = 600;

/// Complete client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Happenings endpoint URL, without a query string.
    pub api_url: String,
    /// Value sent as the `User-Agent` header on every request.
    pub user_agent: String,
    /// Transport timeout for a single request.
    pub request_timeout: Duration,
    /// Minimum delay after each request, and the fallback when the
    /// server omits rate-limit telemetry.
    pub min_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            min_delay: Duration::from_millis(DEFAULT_MIN_DELAY_MS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `FOUNDINGS_API_URL` -- happenings endpoint (default [`DEFAULT_API_URL`])
    /// - `FOUNDINGS_USER_AGENT` -- client identifier (default [`DEFAULT_USER_AGENT`])
    /// - `FOUNDINGS_REQUEST_TIMEOUT_MS` -- request timeout (default 30000)
    /// - `FOUNDINGS_MIN_DELAY_MS` -- minimum request spacing (default 600)
    pub fn from_env() -> Result<Self, ClientError> {
        let api_url =
            std::env::var("FOUNDINGS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        let user_agent = std::env::var("FOUNDINGS_USER_AGENT")
            .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_owned());
        let request_timeout_ms =
            env_u64("FOUNDINGS_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?;
        let min_delay_ms = env_u64("FOUNDINGS_MIN_DELAY_MS", DEFAULT_MIN_DELAY_MS)?;

        let config = Self {
            api_url,
            user_agent,
            request_timeout: Duration::from_millis(request_timeout_ms),
            min_delay: Duration::from_millis(min_delay_ms),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that the environment cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the user agent or URL is blank,
    /// or the request timeout is zero.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.user_agent.trim().is_empty() {
            return Err(ClientError::Config(
                "FOUNDINGS_USER_AGENT must not be empty".to_owned(),
            ));
        }
        if self.api_url.trim().is_empty() {
            return Err(ClientError::Config(
                "FOUNDINGS_API_URL must not be empty".to_owned(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ClientError::Config(
                "FOUNDINGS_REQUEST_TIMEOUT_MS must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Read an optional integer environment variable.
fn env_u64(name: &str, default: u64) -> Result<u64, ClientError> {
    std::env::var(name).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| ClientError::Config(format!("invalid {name}: {e}")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_delay, Duration::from_millis(600));
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn blank_user_agent_is_rejected() {
        let config = ClientConfig {
            user_agent: "   ".to_owned(),
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = ClientConfig {
            request_timeout: Duration::ZERO,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
