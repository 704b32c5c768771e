//! Fetchers for the price-data endpoints.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::error::ApiError;
use crate::api::{ApiClient, MarketApi};
use crate::models::{CorrelationSeries, DailySeries, LatestPrice, RealtimeQuote, StatsSnapshot};

impl ApiClient {
    pub async fn fetch_stats(&self) -> Result<StatsSnapshot, ApiError> {
        self.get_json("/api/gold/stats", &[], self.base_timeout())
            .await
    }

    pub async fn fetch_daily_prices(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<DailySeries, ApiError> {
        let mut query = Vec::new();
        if let Some(start) = start_date {
            query.push(("start_date", start.to_string()));
        }
        if let Some(end) = end_date {
            query.push(("end_date", end.to_string()));
        }
        self.get_json("/api/gold/prices/daily", &query, self.base_timeout())
            .await
    }

    pub async fn fetch_correlation(&self, days: u32) -> Result<CorrelationSeries, ApiError> {
        self.get_json(
            "/api/gold/prices/correlation",
            &[("days", days.to_string())],
            self.base_timeout(),
        )
        .await
    }

    pub async fn fetch_latest_price(&self) -> Result<LatestPrice, ApiError> {
        self.get_json("/api/gold/prices/latest", &[], self.base_timeout())
            .await
    }

    pub async fn fetch_dollar_realtime(&self) -> Result<RealtimeQuote, ApiError> {
        self.get_json("/api/gold/dollar-realtime", &[], self.base_timeout())
            .await
    }

    /// Convenience fetch of both chart series with overlapping latencies.
    pub async fn fetch_all_price_data(
        &self,
        days: u32,
    ) -> Result<(DailySeries, CorrelationSeries), ApiError> {
        tokio::try_join!(
            self.fetch_daily_prices(None, None),
            self.fetch_correlation(days)
        )
    }
}

#[async_trait]
impl MarketApi for ApiClient {
    async fn fetch_stats(&self) -> Result<StatsSnapshot, ApiError> {
        ApiClient::fetch_stats(self).await
    }

    async fn fetch_daily_prices(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<DailySeries, ApiError> {
        ApiClient::fetch_daily_prices(self, start_date, end_date).await
    }

    async fn fetch_correlation(&self, days: u32) -> Result<CorrelationSeries, ApiError> {
        ApiClient::fetch_correlation(self, days).await
    }

    async fn fetch_dollar_realtime(&self) -> Result<RealtimeQuote, ApiError> {
        ApiClient::fetch_dollar_realtime(self).await
    }
}
