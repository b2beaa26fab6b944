//! `reqwest` implementation of [`FoundingSource`] for the happenings feed.

use std::time::Duration;

use chrono::{DateTime, Utc};
use founding_types::Founding;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::budget::{RETRY_AFTER_HEADER, RateBudget, backoff_delay, header_u64};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::parse::parse_foundings;
use crate::source::{FoundingSource, PAGE_SIZE};

/// Client for the founding happenings feed.
///
/// Issues one request per [`fetch_range`](FoundingSource::fetch_range)
/// call and sleeps for the pacing delay before returning, so a caller
/// that awaits each call in turn never outruns the server's budget.
#[derive(Debug, Clone)]
pub struct HappeningsClient {
    client: reqwest::Client,
    api_url: String,
    min_delay: Duration,
}

impl HappeningsClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the configuration is invalid,
    /// or [`ClientError::Request`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('?').to_owned(),
            min_delay: config.min_delay,
        })
    }

    /// The request URL for foundings between `since` and `before`.
    pub fn request_url(&self, since: DateTime<Utc>, before: DateTime<Utc>) -> String {
        format!(
            "{}?q=happenings;filter=founding;limit={PAGE_SIZE};beforetime={};sincetime={}",
            self.api_url,
            before.timestamp(),
            since.timestamp(),
        )
    }

    /// Sleep for the delay the budget allows.
    async fn pace(&self, budget: &RateBudget) -> Duration {
        if !budget.is_complete() {
            warn!(
                remaining = ?budget.remaining,
                reset_seconds = ?budget.reset_seconds,
                fallback_ms = self.min_delay.as_millis(),
                "rate-limit telemetry missing, using minimum delay"
            );
        } else if budget.remaining == Some(0) {
            warn!(
                reset_seconds = ?budget.reset_seconds,
                "rate-limit budget exhausted, waiting for reset"
            );
        }

        let delay = budget.pacing_delay(self.min_delay);
        tokio::time::sleep(delay).await;
        delay
    }
}

impl FoundingSource for HappeningsClient {
    async fn fetch_range(
        &self,
        since: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> Result<Vec<Founding>, ClientError> {
        let url = self.request_url(since, before);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        let budget = RateBudget::from_headers(response.headers());

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = header_u64(response.headers(), RETRY_AFTER_HEADER);
            let delay = backoff_delay(&budget, retry_after, self.min_delay);
            warn!(
                ?retry_after,
                delay_ms = delay.as_millis(),
                "rate limited by upstream, backing off"
            );
            tokio::time::sleep(delay).await;
            return Err(ClientError::RateLimited { retry_after });
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            self.pace(&budget).await;
            return Err(ClientError::Status { status, body });
        }

        let body = response.text().await;
        // The request consumed budget whether or not the body is usable.
        let delay = self.pace(&budget).await;
        let foundings = parse_foundings(&body?)?;

        debug!(
            since = since.timestamp(),
            before = before.timestamp(),
            page_size = foundings.len(),
            delay_ms = delay.as_millis(),
            "fetched founding page"
        );

        Ok(foundings)
    }
}
