//! Fetchers for news, price predictions and the liveness probe.

use crate::api::ApiClient;
use crate::api::error::ApiError;
use crate::models::{HealthStatus, NewsItem, PricePrediction};

impl ApiClient {
    pub async fn fetch_news(&self, limit: u32, offset: u32) -> Result<Vec<NewsItem>, ApiError> {
        self.get_json(
            "/api/news",
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
            self.base_timeout(),
        )
        .await
    }

    pub async fn fetch_latest_news(&self, limit: u32) -> Result<Vec<NewsItem>, ApiError> {
        self.get_json(
            "/api/news/latest",
            &[("limit", limit.to_string())],
            self.base_timeout(),
        )
        .await
    }

    pub async fn fetch_predictions(&self) -> Result<Vec<PricePrediction>, ApiError> {
        self.get_json("/api/predictions", &[], self.base_timeout())
            .await
    }

    pub async fn fetch_latest_prediction(&self) -> Result<PricePrediction, ApiError> {
        self.get_json("/api/predictions/latest", &[], self.base_timeout())
            .await
    }

    pub async fn check_health(&self) -> Result<HealthStatus, ApiError> {
        self.get_json("/health", &[], self.base_timeout()).await
    }
}
