//! Data coordinator: single owner of the dashboard's cached state.
//!
//! All mutation flows through the refresh operations here. Consumers get a
//! cloned [`DashboardSnapshot`] and apply their own fallbacks; nothing in
//! this module ever propagates a fetch error to a caller. Overlapping
//! forced refreshes for one resource are deliberately not serialized: the
//! freshness gate is the sole throttle, and the last writer wins. The state
//! lock is never held across a network await, so each write lands atomically.

pub mod freshness;
pub mod merge;
pub mod state;

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::MarketApi;

pub use merge::{MergeOutcome, merge_realtime};
pub use state::{ChartsRefresh, DashboardSnapshot, QuoteMerge, Refresh};
use state::DashboardState;

/// Cadence of both periodic loops.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(10);
/// History depth requested for the correlation series.
pub const CORRELATION_DAYS: u32 = 30;

pub struct Coordinator {
    api: Arc<dyn MarketApi>,
    state: Mutex<DashboardState>,
}

impl Coordinator {
    pub fn new(api: Arc<dyn MarketApi>) -> Self {
        Coordinator {
            api,
            state: Mutex::new(DashboardState::default()),
        }
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Refreshes the stats resource through the freshness gate.
    pub async fn refresh_stats(&self, force: bool) -> Refresh {
        {
            let mut state = self.state.lock().await;
            if !freshness::should_fetch(state.stats.last_fetch(), force) {
                debug!("Stats still fresh, skipping fetch");
                return Refresh::Skipped;
            }
            state.stats.begin();
        }

        let result = self.api.fetch_stats().await;

        let mut state = self.state.lock().await;
        let outcome = match result {
            Ok(stats) => {
                state.stats.store(stats, Instant::now());
                state.last_updated = Some(Local::now());
                Refresh::Fetched
            }
            Err(err) => {
                warn!(error = %err, "Failed to fetch market stats");
                state.stats.fail("failed to fetch market stats");
                Refresh::Failed
            }
        };
        state.stats.finish();
        outcome
    }

    /// Refreshes the daily and correlation series. Each is gated
    /// independently; the due fetches run concurrently. The realtime-quote
    /// merge on the correlation branch is best-effort: its failure stores
    /// the unmerged historical series and never fails the operation. A hard
    /// failure of either underlying fetch marks both chart resources
    /// errored and stores nothing.
    pub async fn refresh_charts(&self, force: bool) -> ChartsRefresh {
        let (fetch_daily, fetch_correlation) = {
            let mut state = self.state.lock().await;
            let daily_due = freshness::should_fetch(state.daily.last_fetch(), force);
            let correlation_due =
                freshness::should_fetch(state.correlation.last_fetch(), force);
            if daily_due {
                state.daily.begin();
            }
            if correlation_due {
                state.correlation.begin();
            }
            (daily_due, correlation_due)
        };

        if !fetch_daily && !fetch_correlation {
            debug!("Chart data still fresh, skipping fetch");
            return ChartsRefresh {
                daily: Refresh::Skipped,
                correlation: Refresh::Skipped,
                merge: QuoteMerge::NotAttempted,
            };
        }

        let daily_task = async {
            if fetch_daily {
                Some(self.api.fetch_daily_prices(None, None).await)
            } else {
                None
            }
        };
        let correlation_task = async {
            if fetch_correlation {
                Some(self.api.fetch_correlation(CORRELATION_DAYS).await)
            } else {
                None
            }
        };
        let (daily_result, correlation_result) = tokio::join!(daily_task, correlation_task);

        let failed = daily_result.as_ref().is_some_and(|r| r.is_err())
            || correlation_result.as_ref().is_some_and(|r| r.is_err());
        if failed {
            if let Some(Err(err)) = &daily_result {
                warn!(error = %err, "Failed to fetch daily price series");
            }
            if let Some(Err(err)) = &correlation_result {
                warn!(error = %err, "Failed to fetch correlation series");
            }
            let mut state = self.state.lock().await;
            state.daily.fail("failed to fetch chart data");
            state.correlation.fail("failed to fetch chart data");
            state.daily.finish();
            state.correlation.finish();
            return ChartsRefresh {
                daily: Refresh::Failed,
                correlation: Refresh::Failed,
                merge: QuoteMerge::NotAttempted,
            };
        }

        let mut merge_outcome = QuoteMerge::NotAttempted;
        let correlation_value = match correlation_result {
            Some(Ok(mut series)) => {
                match self.api.fetch_dollar_realtime().await {
                    Ok(quote) => {
                        let applied =
                            merge::merge_realtime(&mut series, quote.price, Local::now().date_naive());
                        merge_outcome = QuoteMerge::Applied(applied);
                    }
                    Err(err) => {
                        warn!(error = %err, "Realtime dollar quote unavailable, keeping historical series");
                        merge_outcome = QuoteMerge::QuoteUnavailable(err.to_string());
                    }
                }
                Some(series)
            }
            _ => None,
        };

        let now = Instant::now();
        let mut state = self.state.lock().await;
        let daily_outcome = match daily_result {
            Some(Ok(series)) => {
                state.daily.store(series, now);
                Refresh::Fetched
            }
            _ => Refresh::Skipped,
        };
        let correlation_outcome = match correlation_value {
            Some(series) => {
                state.correlation.store(series, now);
                Refresh::Fetched
            }
            None => Refresh::Skipped,
        };
        state.last_updated = Some(Local::now());
        state.daily.finish();
        state.correlation.finish();

        ChartsRefresh {
            daily: daily_outcome,
            correlation: correlation_outcome,
            merge: merge_outcome,
        }
    }

    /// Forces both primary refreshes, run concurrently.
    pub async fn refresh_all(&self) -> (Refresh, ChartsRefresh) {
        tokio::join!(self.refresh_stats(true), self.refresh_charts(true))
    }

    /// Independent low-priority fetch of the realtime dollar quote. Stores
    /// the quote and re-applies the merge onto whatever correlation series
    /// is cached; with no series loaded yet the quote is still stored.
    /// Failures are logged and swallowed; this cadence must never surface
    /// an error or interrupt anything else.
    pub async fn refresh_realtime_quote(&self) -> QuoteMerge {
        match self.api.fetch_dollar_realtime().await {
            Ok(quote) => {
                let today = Local::now().date_naive();
                let mut state = self.state.lock().await;
                let applied = match state.correlation.value_mut() {
                    Some(series) => merge::merge_realtime(series, quote.price, today),
                    None => MergeOutcome::NoSeries,
                };
                debug!(price = quote.price, ?applied, "Stored realtime dollar quote");
                state.dollar_realtime = Some(quote);
                state.last_updated = Some(Local::now());
                QuoteMerge::Applied(applied)
            }
            Err(err) => {
                warn!(error = %err, "Failed to fetch realtime dollar quote");
                QuoteMerge::QuoteUnavailable(err.to_string())
            }
        }
    }
}

/// Running coordinator plus its two periodic loops. Dropping (or calling
/// [`CoordinatorHandle::shutdown`]) aborts both tasks, so no timer outlives
/// the handle.
pub struct CoordinatorHandle {
    coordinator: Arc<Coordinator>,
    tasks: Vec<JoinHandle<()>>,
}

impl CoordinatorHandle {
    /// Starts the coordinator: one immediate initial load, then the
    /// stats/charts loop and the independent realtime-quote loop.
    pub fn spawn(api: Arc<dyn MarketApi>) -> Self {
        Self::spawn_with_interval(api, REFRESH_INTERVAL)
    }

    /// Same as [`CoordinatorHandle::spawn`] with an explicit loop cadence.
    pub fn spawn_with_interval(api: Arc<dyn MarketApi>, interval: Duration) -> Self {
        let coordinator = Arc::new(Coordinator::new(api));

        // Primary loop: initial (gated) load, then forced refreshes. The
        // two loops are separate tasks so a slow chart refresh never
        // delays the quote cadence, and vice versa.
        let primary = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move {
                info!("Starting stats/charts refresh loop");
                tokio::join!(
                    coordinator.refresh_stats(false),
                    coordinator.refresh_charts(false)
                );
                loop {
                    tokio::time::sleep(interval).await;
                    tokio::join!(
                        coordinator.refresh_stats(true),
                        coordinator.refresh_charts(true)
                    );
                }
            })
        };

        // Quote loop: fires once immediately, then on the same cadence.
        let quote = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move {
                info!("Starting realtime quote refresh loop");
                coordinator.refresh_realtime_quote().await;
                loop {
                    tokio::time::sleep(interval).await;
                    coordinator.refresh_realtime_quote().await;
                }
            })
        };

        CoordinatorHandle {
            coordinator,
            tasks: vec![primary, quote],
        }
    }

    pub fn coordinator(&self) -> &Arc<Coordinator> {
        &self.coordinator
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.coordinator.snapshot().await
    }

    pub fn shutdown(mut self) {
        self.abort_tasks();
        info!("Coordinator loops stopped");
    }

    fn abort_tasks(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for CoordinatorHandle {
    fn drop(&mut self) {
        self.abort_tasks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::{
        CorrelationPoint, CorrelationSeries, DailySeries, PricePoint, RealtimeQuote,
        StatsSnapshot,
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn sample_stats() -> StatsSnapshot {
        StatsSnapshot {
            current_price: 4012.5,
            start_price: 3300.0,
            ytd_return: 21.6,
            max_price: 4100.0,
            min_price: 3250.0,
            max_date: NaiveDate::from_ymd_opt(2026, 7, 15).unwrap(),
            min_date: NaiveDate::from_ymd_opt(2026, 1, 8).unwrap(),
            volatility: 14.2,
            market_status: "bull".to_string(),
            market_status_desc: "Strong upward trend".to_string(),
            updated_at: "2026-08-01T09:30:00Z".to_string(),
        }
    }

    fn sample_quote(price: f64) -> RealtimeQuote {
        RealtimeQuote {
            price,
            previous_close: 102.1,
            change_percent: -0.29,
            updated_at: "2026-08-01T09:31:00Z".to_string(),
            source: "exchange-feed".to_string(),
        }
    }

    fn yesterday_series() -> CorrelationSeries {
        let yesterday = Local::now().date_naive().pred_opt().unwrap();
        vec![CorrelationPoint {
            date: yesterday,
            gold_price: 4000.0,
            dollar_index: 101.0,
        }]
    }

    fn transport_stub() -> ApiError {
        // A status error stands in for any failed fetch; the coordinator
        // treats all fetch errors alike.
        ApiError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            url: "http://localhost/api".to_string(),
        }
    }

    /// Scripted MarketApi with per-resource call counters and failure
    /// switches.
    #[derive(Default)]
    struct ScriptedApi {
        stats_calls: AtomicUsize,
        daily_calls: AtomicUsize,
        correlation_calls: AtomicUsize,
        quote_calls: AtomicUsize,
        fail_stats: AtomicBool,
        fail_daily: AtomicBool,
        fail_correlation: AtomicBool,
        fail_quote: AtomicBool,
        quote_price: f64,
    }

    impl ScriptedApi {
        fn new(quote_price: f64) -> Self {
            ScriptedApi {
                quote_price,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl MarketApi for ScriptedApi {
        async fn fetch_stats(&self) -> Result<StatsSnapshot, ApiError> {
            self.stats_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_stats.load(Ordering::SeqCst) {
                return Err(transport_stub());
            }
            Ok(sample_stats())
        }

        async fn fetch_daily_prices(
            &self,
            _start_date: Option<NaiveDate>,
            _end_date: Option<NaiveDate>,
        ) -> Result<DailySeries, ApiError> {
            self.daily_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_daily.load(Ordering::SeqCst) {
                return Err(transport_stub());
            }
            Ok(vec![PricePoint {
                date: NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
                price: 4001.2,
                volume: 121000.0,
                open_price: None,
                high_price: None,
                low_price: None,
                change_percent: None,
            }])
        }

        async fn fetch_correlation(&self, _days: u32) -> Result<CorrelationSeries, ApiError> {
            self.correlation_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_correlation.load(Ordering::SeqCst) {
                return Err(transport_stub());
            }
            Ok(yesterday_series())
        }

        async fn fetch_dollar_realtime(&self) -> Result<RealtimeQuote, ApiError> {
            self.quote_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_quote.load(Ordering::SeqCst) {
                return Err(transport_stub());
            }
            Ok(sample_quote(self.quote_price))
        }
    }

    #[tokio::test]
    async fn test_refresh_within_window_fetches_once() {
        let api = Arc::new(ScriptedApi::new(101.8));
        let coordinator = Coordinator::new(api.clone());

        assert_eq!(coordinator.refresh_stats(false).await, Refresh::Fetched);
        assert_eq!(coordinator.refresh_stats(false).await, Refresh::Skipped);
        assert_eq!(api.stats_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_forced_refresh_bypasses_window() {
        let api = Arc::new(ScriptedApi::new(101.8));
        let coordinator = Coordinator::new(api.clone());

        coordinator.refresh_stats(false).await;
        assert_eq!(coordinator.refresh_stats(true).await, Refresh::Fetched);
        assert_eq!(api.stats_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_stats_keeps_previous_value() {
        let api = Arc::new(ScriptedApi::new(101.8));
        let coordinator = Coordinator::new(api.clone());

        coordinator.refresh_stats(true).await;
        api.fail_stats.store(true, Ordering::SeqCst);
        assert_eq!(coordinator.refresh_stats(true).await, Refresh::Failed);

        let snapshot = coordinator.snapshot().await;
        let stats = snapshot.stats;
        assert!(stats.has_error());
        assert!(!stats.loading);
        assert_eq!(stats.value.unwrap().current_price, 4012.5);
    }

    #[tokio::test]
    async fn test_charts_merge_appends_realtime_point() {
        let api = Arc::new(ScriptedApi::new(99.5));
        let coordinator = Coordinator::new(api.clone());

        let outcome = coordinator.refresh_charts(true).await;
        assert_eq!(outcome.daily, Refresh::Fetched);
        assert_eq!(outcome.correlation, Refresh::Fetched);
        assert_eq!(outcome.merge, QuoteMerge::Applied(MergeOutcome::Appended));

        let snapshot = coordinator.snapshot().await;
        let series = snapshot.correlation.value.unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.last().unwrap().date, Local::now().date_naive());
        assert_eq!(series.last().unwrap().dollar_index, 99.5);
        assert_eq!(series.last().unwrap().gold_price, 4000.0);
    }

    #[tokio::test]
    async fn test_quote_failure_does_not_fail_charts() {
        let api = Arc::new(ScriptedApi::new(99.5));
        api.fail_quote.store(true, Ordering::SeqCst);
        let coordinator = Coordinator::new(api.clone());

        let outcome = coordinator.refresh_charts(true).await;
        assert_eq!(outcome.correlation, Refresh::Fetched);
        assert!(matches!(outcome.merge, QuoteMerge::QuoteUnavailable(_)));

        let snapshot = coordinator.snapshot().await;
        let correlation = snapshot.correlation;
        assert!(!correlation.has_error());
        // Unmerged historical series stored as-is.
        assert_eq!(correlation.value.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_chart_fetch_failure_marks_both_and_preserves_values() {
        let api = Arc::new(ScriptedApi::new(99.5));
        let coordinator = Coordinator::new(api.clone());

        coordinator.refresh_charts(true).await;
        api.fail_daily.store(true, Ordering::SeqCst);

        let outcome = coordinator.refresh_charts(true).await;
        assert_eq!(outcome.daily, Refresh::Failed);
        assert_eq!(outcome.correlation, Refresh::Failed);
        assert_eq!(outcome.merge, QuoteMerge::NotAttempted);

        let snapshot = coordinator.snapshot().await;
        assert!(snapshot.daily.has_error());
        assert!(snapshot.correlation.has_error());
        // Values from the first successful refresh survive.
        assert_eq!(snapshot.daily.value.unwrap().len(), 1);
        assert_eq!(snapshot.correlation.value.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_realtime_quote_without_series_still_stores_quote() {
        let api = Arc::new(ScriptedApi::new(101.8));
        let coordinator = Coordinator::new(api.clone());

        let outcome = coordinator.refresh_realtime_quote().await;
        assert_eq!(outcome, QuoteMerge::Applied(MergeOutcome::NoSeries));

        let snapshot = coordinator.snapshot().await;
        assert_eq!(snapshot.dollar_realtime.unwrap().price, 101.8);
        assert!(snapshot.correlation.value.is_none());
    }

    #[tokio::test]
    async fn test_realtime_quote_merges_into_cached_series() {
        let api = Arc::new(ScriptedApi::new(99.5));
        api.fail_quote.store(true, Ordering::SeqCst);
        let coordinator = Coordinator::new(api.clone());

        // Load the series with the merge step unavailable, so the cached
        // series still ends on yesterday.
        coordinator.refresh_charts(true).await;
        api.fail_quote.store(false, Ordering::SeqCst);

        let first = coordinator.refresh_realtime_quote().await;
        assert_eq!(first, QuoteMerge::Applied(MergeOutcome::Appended));
        let second = coordinator.refresh_realtime_quote().await;
        assert_eq!(second, QuoteMerge::Applied(MergeOutcome::Replaced));

        let snapshot = coordinator.snapshot().await;
        let series = snapshot.correlation.value.unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.last().unwrap().dollar_index, 99.5);
    }

    #[tokio::test]
    async fn test_quote_failure_swallowed() {
        let api = Arc::new(ScriptedApi::new(101.8));
        api.fail_quote.store(true, Ordering::SeqCst);
        let coordinator = Coordinator::new(api.clone());

        let outcome = coordinator.refresh_realtime_quote().await;
        assert!(matches!(outcome, QuoteMerge::QuoteUnavailable(_)));

        let snapshot = coordinator.snapshot().await;
        assert!(snapshot.dollar_realtime.is_none());
        assert!(!snapshot.stats.has_error());
        assert!(!snapshot.correlation.has_error());
    }

    #[tokio::test]
    async fn test_refresh_all_forces_both() {
        let api = Arc::new(ScriptedApi::new(101.8));
        let coordinator = Coordinator::new(api.clone());

        coordinator.refresh_stats(false).await;
        coordinator.refresh_charts(false).await;

        let (stats, charts) = coordinator.refresh_all().await;
        assert_eq!(stats, Refresh::Fetched);
        assert_eq!(charts.daily, Refresh::Fetched);
        assert_eq!(api.stats_calls.load(Ordering::SeqCst), 2);
        assert_eq!(api.daily_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_loops_run_and_stop_on_shutdown() {
        let api = Arc::new(ScriptedApi::new(101.8));
        let handle =
            CoordinatorHandle::spawn_with_interval(api.clone(), Duration::from_millis(20));

        tokio::time::sleep(Duration::from_millis(90)).await;
        let stats_calls = api.stats_calls.load(Ordering::SeqCst);
        let quote_calls = api.quote_calls.load(Ordering::SeqCst);
        // Initial load plus at least one periodic tick on each loop; the
        // quote loop also fired its immediate first fetch, and the charts
        // loop fetches the quote for its merge step.
        assert!(stats_calls >= 2, "stats calls: {stats_calls}");
        assert!(quote_calls >= 2, "quote calls: {quote_calls}");

        handle.shutdown();
        tokio::time::sleep(Duration::from_millis(60)).await;
        let stats_after = api.stats_calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(api.stats_calls.load(Ordering::SeqCst), stats_after);
    }
}
