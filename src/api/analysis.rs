//! Fetchers for the AI analysis endpoints.
//!
//! These trigger expensive upstream generation on the server, so they use
//! the extended timeout. The `refresh` flag asks the server to regenerate
//! instead of serving its cached analysis; the POST variants force it.

use crate::api::ApiClient;
use crate::api::error::ApiError;
use crate::models::{
    BearishFactorsResponse, BullishFactorsResponse, InstitutionPredictionsResponse,
    InvestmentAdviceResponse, MarketSummaryResponse, RefreshEnvelope,
};

fn refresh_query(refresh: bool) -> Vec<(&'static str, String)> {
    vec![("refresh", refresh.to_string())]
}

impl ApiClient {
    pub async fn fetch_bullish_factors(
        &self,
        refresh: bool,
    ) -> Result<BullishFactorsResponse, ApiError> {
        self.get_json(
            "/api/gold/bullish-factors-ai",
            &refresh_query(refresh),
            self.analysis_timeout(),
        )
        .await
    }

    pub async fn refresh_bullish_factors(
        &self,
    ) -> Result<RefreshEnvelope<BullishFactorsResponse>, ApiError> {
        self.post_json("/api/gold/bullish-factors-ai/refresh", self.analysis_timeout())
            .await
    }

    pub async fn fetch_bearish_factors(
        &self,
        refresh: bool,
    ) -> Result<BearishFactorsResponse, ApiError> {
        self.get_json(
            "/api/gold/bearish-factors-ai",
            &refresh_query(refresh),
            self.analysis_timeout(),
        )
        .await
    }

    pub async fn refresh_bearish_factors(
        &self,
    ) -> Result<RefreshEnvelope<BearishFactorsResponse>, ApiError> {
        self.post_json("/api/gold/bearish-factors-ai/refresh", self.analysis_timeout())
            .await
    }

    pub async fn fetch_institution_predictions(
        &self,
        refresh: bool,
    ) -> Result<InstitutionPredictionsResponse, ApiError> {
        self.get_json(
            "/api/gold/institution-predictions-ai",
            &refresh_query(refresh),
            self.analysis_timeout(),
        )
        .await
    }

    pub async fn refresh_institution_predictions(
        &self,
    ) -> Result<RefreshEnvelope<InstitutionPredictionsResponse>, ApiError> {
        self.post_json(
            "/api/gold/institution-predictions-ai/refresh",
            self.analysis_timeout(),
        )
        .await
    }

    pub async fn fetch_investment_advice(
        &self,
        refresh: bool,
    ) -> Result<InvestmentAdviceResponse, ApiError> {
        self.get_json(
            "/api/gold/investment-advice-ai",
            &refresh_query(refresh),
            self.analysis_timeout(),
        )
        .await
    }

    pub async fn refresh_investment_advice(
        &self,
    ) -> Result<RefreshEnvelope<InvestmentAdviceResponse>, ApiError> {
        self.post_json(
            "/api/gold/investment-advice-ai/refresh",
            self.analysis_timeout(),
        )
        .await
    }

    pub async fn fetch_market_summary(
        &self,
        refresh: bool,
    ) -> Result<MarketSummaryResponse, ApiError> {
        self.get_json(
            "/api/gold/market-summary-ai",
            &refresh_query(refresh),
            self.analysis_timeout(),
        )
        .await
    }

    pub async fn refresh_market_summary(
        &self,
    ) -> Result<RefreshEnvelope<MarketSummaryResponse>, ApiError> {
        self.post_json("/api/gold/market-summary-ai/refresh", self.analysis_timeout())
            .await
    }
}
