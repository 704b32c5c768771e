//! HTTP client for the gold-market service.

pub mod analysis;
pub mod error;
pub mod gold;
pub mod news;
pub mod retry;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::debug;

pub use error::ApiError;

use crate::models::{CorrelationSeries, DailySeries, RealtimeQuote, StatsSnapshot};

/// Baseline timeout for plain data endpoints.
pub const BASE_TIMEOUT: Duration = Duration::from_secs(30);
/// Extended timeout for endpoints that trigger upstream AI generation.
pub const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(120);

const MAX_RETRIES: usize = 2;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// The price-data surface the coordinator depends on. Kept narrow so tests
/// can substitute a scripted implementation.
#[async_trait]
pub trait MarketApi: Send + Sync {
    async fn fetch_stats(&self) -> Result<StatsSnapshot, ApiError>;
    async fn fetch_daily_prices(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<DailySeries, ApiError>;
    async fn fetch_correlation(&self, days: u32) -> Result<CorrelationSeries, ApiError>;
    async fn fetch_dollar_realtime(&self) -> Result<RealtimeQuote, ApiError>;
}

pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    base_timeout: Duration,
    analysis_timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeouts(base_url, BASE_TIMEOUT, ANALYSIS_TIMEOUT)
    }

    /// Constructor with explicit timeouts, used by tests to keep the
    /// transport-failure paths fast.
    pub fn with_timeouts(
        base_url: &str,
        base_timeout: Duration,
        analysis_timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("goldwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            base_timeout,
            analysis_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn base_timeout(&self) -> Duration {
        self.base_timeout
    }

    pub(crate) fn analysis_timeout(&self) -> Duration {
        self.analysis_timeout
    }

    /// GET `path` and decode the JSON body, retrying transport failures.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Requesting {}", url);
        retry::with_retry(
            || async {
                let request = self.client.get(&url).query(query).timeout(timeout);
                self.execute(request, &url).await
            },
            MAX_RETRIES,
            RETRY_DELAY,
        )
        .await
    }

    /// POST to `path` with an empty body and decode the JSON response.
    /// Transport retry applies here too; a request that never reached the
    /// server cannot have triggered regeneration.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        timeout: Duration,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Posting to {}", url);
        retry::with_retry(
            || async {
                let request = self.client.post(&url).timeout(timeout);
                self.execute(request, &url).await
            },
            MAX_RETRIES,
            RETRY_DELAY,
        )
        .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
            });
        }

        // An error while reading the body still counts as transport: the
        // response never arrived in full.
        let text = response.text().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
