//! Static per-section defaults.
//!
//! Sections substitute these when a resource has never loaded or its last
//! refresh failed. The coordinator itself never touches this content; the
//! substitution is strictly a consumer concern.

use crate::models::{
    BearishFactorsResponse, BullishFactorsResponse, Factor, Impact, InstitutionPrediction,
    InstitutionPredictionsResponse, Sentiment,
};

pub fn bullish_factors() -> BullishFactorsResponse {
    BullishFactorsResponse {
        bullish_factors: vec![
            Factor {
                id: "fed-policy".to_string(),
                title: "Fed easing cycle".to_string(),
                subtitle: "Monetary policy turning loose".to_string(),
                description: "Rate cuts push real yields lower, lifting the appeal of \
                              gold as a non-yielding asset."
                    .to_string(),
                details: vec![
                    "Cutting cycle under way since late 2024".to_string(),
                    "Falling real rates lower the opportunity cost of holding gold".to_string(),
                    "Markets price further cuts ahead".to_string(),
                ],
                impact: Impact::High,
            },
            Factor {
                id: "central-bank".to_string(),
                title: "Sustained central-bank buying".to_string(),
                subtitle: "Reserve de-dollarization".to_string(),
                description: "Official-sector purchases have topped a thousand tonnes for \
                              two consecutive years, led by emerging-market banks."
                    .to_string(),
                details: vec![
                    "Second straight year above 1,000 tonnes".to_string(),
                    "Emerging-market banks diversify reserves into gold".to_string(),
                    "Dollar share of global reserves keeps sliding".to_string(),
                ],
                impact: Impact::High,
            },
            Factor {
                id: "geopolitical".to_string(),
                title: "Geopolitical risk".to_string(),
                subtitle: "Safe-haven demand".to_string(),
                description: "Recurring conflict and trade-war flashpoints keep haven \
                              flows moving into gold."
                    .to_string(),
                details: vec![
                    "Ongoing conflicts with little visibility on resolution".to_string(),
                    "Tariff escalations strain global trade".to_string(),
                ],
                impact: Impact::Medium,
            },
        ],
        analysis_summary: "Offline defaults: structural demand drivers remain supportive."
            .to_string(),
        last_updated: String::new(),
    }
}

pub fn bearish_factors() -> BearishFactorsResponse {
    BearishFactorsResponse {
        bearish_factors: vec![
            Factor {
                id: "dollar-rebound".to_string(),
                title: "Dollar rebound".to_string(),
                subtitle: "Rate-differential support".to_string(),
                description: "A firmer dollar raises the cost of gold for non-dollar \
                              buyers and pressures the price."
                    .to_string(),
                details: vec![
                    "Resilient US data can delay further easing".to_string(),
                    "Dollar strength historically caps gold rallies".to_string(),
                ],
                impact: Impact::Medium,
            },
            Factor {
                id: "positioning".to_string(),
                title: "Stretched positioning".to_string(),
                subtitle: "Crowded longs".to_string(),
                description: "Speculative length near historical highs leaves the market \
                              vulnerable to sharp washouts."
                    .to_string(),
                details: vec![
                    "Futures positioning at elevated percentiles".to_string(),
                    "ETF inflows prone to fast reversals".to_string(),
                ],
                impact: Impact::Medium,
            },
        ],
        analysis_summary: "Offline defaults: corrections within an intact uptrend are the \
                           main near-term risk."
            .to_string(),
        last_updated: String::new(),
    }
}

pub fn institution_predictions() -> InstitutionPredictionsResponse {
    InstitutionPredictionsResponse {
        institutions: vec![
            InstitutionPrediction {
                name: "Global Bank Research".to_string(),
                logo: "bank".to_string(),
                rating: Sentiment::Bullish,
                target_price: 4300.0,
                timeframe: "12 months".to_string(),
                reasoning: "Central-bank demand and falling real yields support a higher \
                            trading range."
                    .to_string(),
                key_points: vec![
                    "Official-sector buying continues".to_string(),
                    "Real-yield tailwind intact".to_string(),
                ],
            },
            InstitutionPrediction {
                name: "Metals Desk Strategy".to_string(),
                logo: "chart".to_string(),
                rating: Sentiment::Neutral,
                target_price: 4050.0,
                timeframe: "6 months".to_string(),
                reasoning: "Consolidation likely after the strong year-to-date run."
                    .to_string(),
                key_points: vec!["Range trade expected near term".to_string()],
            },
            InstitutionPrediction {
                name: "Macro Advisory".to_string(),
                logo: "globe".to_string(),
                rating: Sentiment::Bearish,
                target_price: 3800.0,
                timeframe: "6 months".to_string(),
                reasoning: "A hawkish repricing of rate expectations would pressure \
                            non-yielding assets."
                    .to_string(),
                key_points: vec!["Watch the dollar and real yields".to_string()],
            },
        ],
        analysis_summary: "Offline defaults: street targets span 3800-4300 depending on \
                           the rates path."
            .to_string(),
        last_updated: String::new(),
    }
}
