//! Terminal renderings of the dashboard sections.
//!
//! Each function turns one resource view (or fetched response) into a
//! printable block. Sections are passive consumers: they read snapshot
//! values, show the error state when a resource is degraded, and leave all
//! fetch scheduling to the coordinator.

use comfy_table::Cell;

use crate::coordinator::DashboardSnapshot;
use crate::models::{
    BearishFactorsResponse, BullishFactorsResponse, CorrelationSeries, DailySeries, Factor,
    InstitutionPredictionsResponse, InvestmentAdviceResponse, MarketSummaryResponse, NewsItem,
    PricePrediction, RealtimeQuote, StatsSnapshot,
};
use crate::ui::{self, StyleType};

/// Rows of history shown in the daily and correlation tables.
const SERIES_TAIL: usize = 10;

fn warning_line(message: &str) -> String {
    format!(
        "{}\n",
        ui::style_text(&format!("warning: {message}"), StyleType::Error)
    )
}

fn section_title(title: &str) -> String {
    format!("{}\n\n", ui::style_text(title, StyleType::Title))
}

pub fn render_stats(
    stats: Option<&StatsSnapshot>,
    error: Option<&str>,
) -> String {
    let mut output = section_title("Market Overview");

    if let Some(error) = error {
        output.push_str(&warning_line(error));
    }

    let Some(stats) = stats else {
        output.push_str(&ui::style_text("No market stats available yet", StyleType::Subtle));
        output.push('\n');
        return output;
    };

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Current"),
        ui::header_cell("YTD"),
        ui::header_cell("Period High"),
        ui::header_cell("Period Low"),
        ui::header_cell("Volatility"),
        ui::header_cell("Status"),
    ]);
    table.add_row(vec![
        Cell::new(format!("{:.2}", stats.current_price)),
        ui::change_cell(stats.ytd_return),
        Cell::new(format!("{:.2} ({})", stats.max_price, stats.max_date)),
        Cell::new(format!("{:.2} ({})", stats.min_price, stats.min_date)),
        Cell::new(format!("{:.1}%", stats.volatility)),
        Cell::new(&stats.market_status),
    ]);

    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n{}\n",
        ui::style_text(&stats.market_status_desc, StyleType::Subtle)
    ));
    output
}

pub fn render_daily(series: Option<&DailySeries>, error: Option<&str>) -> String {
    let mut output = section_title("Daily Prices");

    if let Some(error) = error {
        output.push_str(&warning_line(error));
    }

    let Some(series) = series.filter(|s| !s.is_empty()) else {
        output.push_str(&ui::style_text("No price history yet", StyleType::Subtle));
        output.push('\n');
        return output;
    };

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Price"),
        ui::header_cell("Change"),
        ui::header_cell("Volume"),
    ]);
    let tail_start = series.len().saturating_sub(SERIES_TAIL);
    for point in &series[tail_start..] {
        table.add_row(vec![
            Cell::new(point.date.to_string()),
            Cell::new(format!("{:.2}", point.price)),
            ui::format_optional_cell(point.change_percent, |c| format!("{c:+.2}%")),
            Cell::new(format!("{:.0}", point.volume)),
        ]);
    }
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

pub fn render_correlation(
    series: Option<&CorrelationSeries>,
    quote: Option<&RealtimeQuote>,
    error: Option<&str>,
) -> String {
    let mut output = section_title("Gold vs Dollar Index");

    if let Some(error) = error {
        output.push_str(&warning_line(error));
    }

    match series.filter(|s| !s.is_empty()) {
        Some(series) => {
            let mut table = ui::new_styled_table();
            table.set_header(vec![
                ui::header_cell("Date"),
                ui::header_cell("Gold"),
                ui::header_cell("Dollar Index"),
            ]);
            let tail_start = series.len().saturating_sub(SERIES_TAIL);
            for point in &series[tail_start..] {
                table.add_row(vec![
                    Cell::new(point.date.to_string()),
                    Cell::new(format!("{:.2}", point.gold_price)),
                    Cell::new(format!("{:.2}", point.dollar_index)),
                ]);
            }
            output.push_str(&table.to_string());
            output.push('\n');
        }
        None => {
            output.push_str(&ui::style_text("No correlation history yet", StyleType::Subtle));
            output.push('\n');
        }
    }

    if let Some(quote) = quote {
        output.push_str(&format!(
            "{} {} ({}, prev close {:.2}, {})\n",
            ui::style_text("Dollar index live:", StyleType::Label),
            ui::style_text(&format!("{:.2}", quote.price), StyleType::Value),
            format!("{:+.2}%", quote.change_percent),
            quote.previous_close,
            quote.source,
        ));
    }
    output
}

/// Full live dashboard assembled from a coordinator snapshot.
pub fn render_dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut output = String::new();

    output.push_str(&render_stats(
        snapshot.stats.value.as_ref(),
        snapshot.stats.error.as_deref(),
    ));
    output.push('\n');
    output.push_str(&render_daily(
        snapshot.daily.value.as_ref(),
        snapshot.daily.error.as_deref(),
    ));
    output.push('\n');
    output.push_str(&render_correlation(
        snapshot.correlation.value.as_ref(),
        snapshot.dollar_realtime.as_ref(),
        snapshot.correlation.error.as_deref(),
    ));

    if let Some(last_updated) = snapshot.last_updated {
        output.push_str(&format!(
            "\n{}\n",
            ui::style_text(
                &format!("Last updated {}", last_updated.format("%Y-%m-%d %H:%M:%S")),
                StyleType::Subtle
            )
        ));
    }
    output
}

fn render_factor_table(title: &str, factors: &[Factor], summary: &str) -> String {
    let mut output = section_title(title);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Impact"),
        ui::header_cell("Factor"),
        ui::header_cell("Detail"),
    ]);
    for factor in factors {
        let mut detail = factor.description.clone();
        for line in &factor.details {
            detail.push_str("\n- ");
            detail.push_str(line);
        }
        table.add_row(vec![
            ui::impact_cell(factor.impact),
            Cell::new(format!("{}\n{}", factor.title, factor.subtitle)),
            Cell::new(detail),
        ]);
    }
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n{}\n",
        ui::style_text(summary, StyleType::Subtle)
    ));
    output
}

pub fn render_bullish_factors(response: &BullishFactorsResponse) -> String {
    render_factor_table(
        "Bullish Factors",
        &response.bullish_factors,
        &response.analysis_summary,
    )
}

pub fn render_bearish_factors(response: &BearishFactorsResponse) -> String {
    render_factor_table(
        "Bearish Factors",
        &response.bearish_factors,
        &response.analysis_summary,
    )
}

pub fn render_institutions(response: &InstitutionPredictionsResponse) -> String {
    let mut output = section_title("Institutional Forecasts");

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Institution"),
        ui::header_cell("Rating"),
        ui::header_cell("Target"),
        ui::header_cell("Horizon"),
        ui::header_cell("Reasoning"),
    ]);
    for institution in &response.institutions {
        let mut reasoning = institution.reasoning.clone();
        for point in &institution.key_points {
            reasoning.push_str("\n- ");
            reasoning.push_str(point);
        }
        table.add_row(vec![
            Cell::new(&institution.name),
            ui::sentiment_cell(institution.rating),
            Cell::new(format!("{:.0}", institution.target_price)),
            Cell::new(&institution.timeframe),
            Cell::new(reasoning),
        ]);
    }
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n{}\n",
        ui::style_text(&response.analysis_summary, StyleType::Subtle)
    ));
    output
}

pub fn render_advice(response: &InvestmentAdviceResponse) -> String {
    let mut output = section_title("Investment Advice");

    let assessment = &response.market_assessment;
    output.push_str(&format!(
        "{} {}\n{} {:?}\n{} {}\n",
        ui::style_text("Position:", StyleType::Label),
        assessment.current_position,
        ui::style_text("Risk:", StyleType::Label),
        assessment.risk_level,
        ui::style_text("Approach:", StyleType::Label),
        assessment.recommended_approach,
    ));
    for consideration in &assessment.key_considerations {
        output.push_str(&format!("  - {consideration}\n"));
    }
    output.push('\n');

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Strategy"),
        ui::header_cell("Allocation"),
        ui::header_cell("Risk"),
        ui::header_cell("Timeframe"),
        ui::header_cell("Entry"),
        ui::header_cell("Exit"),
    ]);
    for strategy in &response.strategies {
        table.add_row(vec![
            Cell::new(format!("{}\n{}", strategy.title, strategy.description)),
            Cell::new(&strategy.allocation),
            Cell::new(format!("{:?}", strategy.risk_level)),
            Cell::new(&strategy.timeframe),
            Cell::new(format!(
                "{}\n{}",
                strategy.entry_strategy.recommended_entry_range,
                strategy.entry_strategy.entry_timing
            )),
            Cell::new(format!(
                "target {}\nstop {}",
                strategy.exit_strategy.profit_target, strategy.exit_strategy.stop_loss
            )),
        ]);
    }
    output.push_str(&table.to_string());
    output.push('\n');

    for principle in &response.core_principles {
        output.push_str(&format!(
            "{} {}\n",
            ui::style_text(&principle.title, StyleType::Label),
            principle.description
        ));
    }
    output.push_str(&format!(
        "\n{}\n{}\n",
        ui::style_text(&response.risk_warning, StyleType::Error),
        ui::style_text(&response.disclaimer, StyleType::Subtle),
    ));
    output
}

pub fn render_market_summary(response: &MarketSummaryResponse) -> String {
    let mut output = section_title("Market Brief");

    output.push_str(&format!(
        "{} {}\n\n",
        ui::style_text("Core view:", StyleType::Label),
        response.core_view
    ));

    let blocks = [
        ("Bullish logic", &response.core_bullish_logic),
        ("Main risks", &response.main_risks),
        ("Consensus", &response.market_consensus),
    ];
    for (label, lines) in blocks {
        output.push_str(&format!("{}\n", ui::style_text(label, StyleType::Label)));
        for line in lines.iter() {
            output.push_str(&format!("  - {line}\n"));
        }
        output.push('\n');
    }

    if !response.institution_targets.is_empty() {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Institution"),
            ui::header_cell("Target"),
            ui::header_cell("Probability"),
            ui::header_cell("Horizon"),
        ]);
        for target in &response.institution_targets {
            table.add_row(vec![
                Cell::new(&target.institution),
                Cell::new(format!("{:.0}", target.target)),
                Cell::new(&target.probability),
                Cell::new(&target.timeframe),
            ]);
        }
        output.push_str(&table.to_string());
        output.push('\n');
    }

    let judgment = &response.comprehensive_judgment;
    output.push_str(&format!(
        "{}\n  bull: {}\n  bear: {}\n  neutral: {}\n\n",
        ui::style_text("Judgment", StyleType::Label),
        judgment.bullish_summary,
        judgment.bearish_summary,
        judgment.neutral_summary,
    ));
    output.push_str(&format!(
        "{} {} (confidence {}, horizon {})\n",
        ui::style_text("Recommendation:", StyleType::Label),
        response.investment_recommendation,
        response.confidence_level,
        response.time_horizon,
    ));
    output
}

pub fn render_news(items: &[NewsItem]) -> String {
    let mut output = section_title("News");

    if items.is_empty() {
        output.push_str(&ui::style_text("No news available", StyleType::Subtle));
        output.push('\n');
        return output;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Published"),
        ui::header_cell("Sentiment"),
        ui::header_cell("Title"),
        ui::header_cell("Source"),
    ]);
    for item in items {
        table.add_row(vec![
            Cell::new(&item.published_at),
            ui::sentiment_cell(item.sentiment),
            Cell::new(format!("{}\n{}", item.title, item.summary)),
            Cell::new(&item.source),
        ]);
    }
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

pub fn render_predictions(predictions: &[PricePrediction]) -> String {
    let mut output = section_title("Price Predictions");

    if predictions.is_empty() {
        output.push_str(&ui::style_text("No predictions available", StyleType::Subtle));
        output.push('\n');
        return output;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Made"),
        ui::header_cell("Target Date"),
        ui::header_cell("Price"),
        ui::header_cell("Confidence"),
        ui::header_cell("Basis"),
    ]);
    for prediction in predictions {
        table.add_row(vec![
            Cell::new(prediction.prediction_date.to_string()),
            Cell::new(prediction.target_date.to_string()),
            Cell::new(format!("{:.2}", prediction.predicted_price)),
            Cell::new(&prediction.confidence_level),
            Cell::new(prediction.factors_considered.join(", ")),
        ]);
    }
    output.push_str(&table.to_string());
    output.push('\n');
    output
}
