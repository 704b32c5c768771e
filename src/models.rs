//! Wire types for the gold-market service API.

use chrono::NaiveDate;
use serde::Deserialize;

/// Aggregate price statistics for the current period.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsSnapshot {
    pub current_price: f64,
    pub start_price: f64,
    pub ytd_return: f64,
    pub max_price: f64,
    pub min_price: f64,
    pub max_date: NaiveDate,
    pub min_date: NaiveDate,
    pub volatility: f64,
    pub market_status: String,
    pub market_status_desc: String,
    pub updated_at: String,
}

/// One daily close in the historical gold series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
    pub volume: f64,
    #[serde(default)]
    pub open_price: Option<f64>,
    #[serde(default)]
    pub high_price: Option<f64>,
    #[serde(default)]
    pub low_price: Option<f64>,
    #[serde(default)]
    pub change_percent: Option<f64>,
}

pub type DailySeries = Vec<PricePoint>;

/// Gold price paired with the dollar index for one calendar day.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CorrelationPoint {
    pub date: NaiveDate,
    pub gold_price: f64,
    pub dollar_index: f64,
}

pub type CorrelationSeries = Vec<CorrelationPoint>;

/// A single live observation of the dollar index. Not part of the
/// historical series; spliced onto it by the coordinator.
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeQuote {
    pub price: f64,
    pub previous_close: f64,
    pub change_percent: f64,
    pub updated_at: String,
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestPrice {
    pub date: NaiveDate,
    pub price: f64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub change_percent: f64,
    pub volume: f64,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub url: String,
    pub published_at: String,
    pub sentiment: Sentiment,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricePrediction {
    pub id: i64,
    pub prediction_date: NaiveDate,
    pub target_date: NaiveDate,
    pub predicted_price: f64,
    pub confidence_level: String,
    pub prediction_type: String,
    pub factors_considered: Vec<String>,
    pub generated_at: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// One AI-generated market factor. The same shape backs both the bullish
/// and the bearish list.
#[derive(Debug, Clone, Deserialize)]
pub struct Factor {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub details: Vec<String>,
    pub impact: Impact,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BullishFactorsResponse {
    pub bullish_factors: Vec<Factor>,
    pub analysis_summary: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BearishFactorsResponse {
    pub bearish_factors: Vec<Factor>,
    pub analysis_summary: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstitutionPrediction {
    pub name: String,
    pub logo: String,
    pub rating: Sentiment,
    pub target_price: f64,
    pub timeframe: String,
    pub reasoning: String,
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstitutionPredictionsResponse {
    pub institutions: Vec<InstitutionPrediction>,
    pub analysis_summary: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Conservative,
    Balanced,
    Opportunistic,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntryStrategy {
    pub current_price_assessment: String,
    pub recommended_entry_range: String,
    pub entry_timing: String,
    pub position_building: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExitStrategy {
    pub profit_target: String,
    pub stop_loss: String,
    pub rebalancing_trigger: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvestmentStrategy {
    #[serde(rename = "type")]
    pub kind: StrategyKind,
    pub title: String,
    pub description: String,
    pub allocation: String,
    pub timeframe: String,
    pub risk_level: RiskLevel,
    pub entry_strategy: EntryStrategy,
    pub exit_strategy: ExitStrategy,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub suitable_for: Vec<String>,
    pub execution_steps: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorePrinciple {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketAssessment {
    pub current_position: String,
    pub risk_level: RiskLevel,
    pub recommended_approach: String,
    pub key_considerations: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdviceMetadata {
    pub generated_at: String,
    pub data_sources: Vec<String>,
    pub analysis_method: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvestmentAdviceResponse {
    pub market_assessment: MarketAssessment,
    pub strategies: Vec<InvestmentStrategy>,
    pub core_principles: Vec<CorePrinciple>,
    pub risk_warning: String,
    pub disclaimer: String,
    #[serde(default)]
    pub metadata: Option<AdviceMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstitutionTarget {
    pub institution: String,
    pub target: f64,
    pub probability: String,
    pub timeframe: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComprehensiveJudgment {
    pub bullish_summary: String,
    pub bearish_summary: String,
    pub neutral_summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryMetadata {
    pub cached: bool,
    pub cache_source: String,
    pub generated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketSummaryResponse {
    pub core_bullish_logic: Vec<String>,
    pub main_risks: Vec<String>,
    pub market_consensus: Vec<String>,
    pub institution_targets: Vec<InstitutionTarget>,
    pub current_price: f64,
    pub comprehensive_judgment: ComprehensiveJudgment,
    pub core_view: String,
    pub investment_recommendation: String,
    pub confidence_level: String,
    pub time_horizon: String,
    #[serde(default)]
    pub metadata: Option<SummaryMetadata>,
}

/// Body returned by the POST `/refresh` endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshEnvelope<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
}
