//! One function per CLI command.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::coordinator::CoordinatorHandle;
use crate::fallback;
use crate::sections;
use crate::ui::{self, StyleType};

/// Redraw cadence of the `watch` dashboard, independent of the
/// coordinator's fetch cadence.
const RENDER_INTERVAL: Duration = Duration::from_secs(2);

/// One-shot market summary: stats, latest price and recent history.
pub async fn summary(client: &ApiClient) -> Result<()> {
    let pb = ui::new_spinner("Fetching market data...");
    let (stats, latest, daily) = futures::join!(
        client.fetch_stats(),
        client.fetch_latest_price(),
        client.fetch_daily_prices(None, None)
    );
    pb.finish_and_clear();

    let stats = stats.context("Failed to fetch market stats")?;
    println!("{}", sections::render_stats(Some(&stats), None));

    match latest {
        Ok(latest) => {
            println!(
                "{} {} ({})",
                ui::style_text("Latest close:", StyleType::Label),
                ui::style_text(&format!("{:.2}", latest.price), StyleType::Value),
                latest.date,
            );
        }
        Err(err) => warn!(error = %err, "Failed to fetch latest price"),
    }

    ui::print_separator();
    let daily = daily.context("Failed to fetch daily prices")?;
    println!("{}", sections::render_daily(Some(&daily), None));
    Ok(())
}

/// Live dashboard: starts the coordinator with its two refresh loops and
/// redraws from snapshots until interrupted (or until `duration` seconds
/// elapse, mainly for scripted runs).
pub async fn watch(client: Arc<ApiClient>, duration: Option<u64>) -> Result<()> {
    let handle = CoordinatorHandle::spawn(client);
    let term = console::Term::stdout();
    let started = tokio::time::Instant::now();

    loop {
        let snapshot = handle.snapshot().await;
        term.clear_screen()?;
        println!("{}", sections::render_dashboard(&snapshot));
        println!(
            "{}",
            ui::style_text("Press Ctrl-C to exit", StyleType::Subtle)
        );

        if let Some(seconds) = duration {
            if started.elapsed() >= Duration::from_secs(seconds) {
                break;
            }
        }

        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for interrupt")?;
                break;
            }
            _ = tokio::time::sleep(RENDER_INTERVAL) => {}
        }
    }

    handle.shutdown();
    Ok(())
}

/// Bullish and bearish factor lists. Both AI fetches run concurrently;
/// either side degrades to its static defaults on failure.
pub async fn factors(client: &ApiClient, refresh: bool) -> Result<()> {
    let pb = ui::new_spinner("Fetching AI factor analysis (this can take a while)...");
    let (bullish, bearish) = futures::join!(
        client.fetch_bullish_factors(refresh),
        client.fetch_bearish_factors(refresh)
    );
    pb.finish_and_clear();

    let bullish = bullish.unwrap_or_else(|err| {
        warn!(error = %err, "Falling back to static bullish factors");
        println!(
            "{}",
            ui::style_text("warning: live bullish analysis unavailable", StyleType::Error)
        );
        fallback::bullish_factors()
    });
    println!("{}", sections::render_bullish_factors(&bullish));

    ui::print_separator();

    let bearish = bearish.unwrap_or_else(|err| {
        warn!(error = %err, "Falling back to static bearish factors");
        println!(
            "{}",
            ui::style_text("warning: live bearish analysis unavailable", StyleType::Error)
        );
        fallback::bearish_factors()
    });
    println!("{}", sections::render_bearish_factors(&bearish));
    Ok(())
}

/// Institutional forecasts, degrading to static defaults on failure.
pub async fn institutions(client: &ApiClient, refresh: bool) -> Result<()> {
    let pb = ui::new_spinner("Fetching institution forecasts...");
    let result = client.fetch_institution_predictions(refresh).await;
    pb.finish_and_clear();

    let predictions = result.unwrap_or_else(|err| {
        warn!(error = %err, "Falling back to static institution forecasts");
        println!(
            "{}",
            ui::style_text("warning: live forecasts unavailable", StyleType::Error)
        );
        fallback::institution_predictions()
    });
    println!("{}", sections::render_institutions(&predictions));
    Ok(())
}

pub async fn advice(client: &ApiClient, refresh: bool) -> Result<()> {
    let pb = ui::new_spinner("Fetching investment advice...");
    let result = client.fetch_investment_advice(refresh).await;
    pb.finish_and_clear();

    let advice = result.context("Failed to fetch investment advice")?;
    if let Some(metadata) = &advice.metadata {
        debug!(generated_at = %metadata.generated_at, "Advice metadata");
    }
    println!("{}", sections::render_advice(&advice));
    Ok(())
}

pub async fn brief(client: &ApiClient, refresh: bool) -> Result<()> {
    let pb = ui::new_spinner("Fetching market brief...");
    let result = client.fetch_market_summary(refresh).await;
    pb.finish_and_clear();

    let summary = result.context("Failed to fetch market brief")?;
    println!("{}", sections::render_market_summary(&summary));
    Ok(())
}

pub async fn news(client: &ApiClient, limit: u32) -> Result<()> {
    let pb = ui::new_spinner("Fetching news...");
    let result = client.fetch_latest_news(limit).await;
    pb.finish_and_clear();

    let items = result.context("Failed to fetch news")?;
    println!("{}", sections::render_news(&items));
    Ok(())
}

pub async fn predictions(client: &ApiClient) -> Result<()> {
    let pb = ui::new_spinner("Fetching price predictions...");
    let result = client.fetch_predictions().await;
    pb.finish_and_clear();

    let predictions = result.context("Failed to fetch predictions")?;
    println!("{}", sections::render_predictions(&predictions));
    Ok(())
}

pub async fn health(client: &ApiClient) -> Result<()> {
    let status = client.check_health().await.context("Health check failed")?;
    println!(
        "{} {} (database: {})",
        ui::style_text("Service:", StyleType::Label),
        ui::style_text(&status.status, StyleType::Value),
        status.database,
    );
    Ok(())
}
