use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use goldwatch::api::ApiClient;
use goldwatch::coordinator::{Coordinator, CoordinatorHandle, MergeOutcome, QuoteMerge, Refresh};
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const STATS_BODY: &str = r#"{
        "current_price": 4012.5,
        "start_price": 3300.0,
        "ytd_return": 21.6,
        "max_price": 4100.0,
        "min_price": 3250.0,
        "max_date": "2026-07-15",
        "min_date": "2026-01-08",
        "volatility": 14.2,
        "market_status": "bull",
        "market_status_desc": "Strong upward trend",
        "updated_at": "2026-08-01T09:30:00Z"
    }"#;

    pub const QUOTE_BODY: &str = r#"{
        "price": 99.5,
        "previous_close": 102.1,
        "change_percent": -2.55,
        "updated_at": "2026-08-01T09:31:00Z",
        "source": "exchange-feed"
    }"#;

    pub fn daily_body() -> String {
        r#"[
            {"date": "2026-07-30", "price": 3990.0, "volume": 110000},
            {"date": "2026-07-31", "price": 4001.2, "volume": 121000}
        ]"#
        .to_string()
    }

    /// Correlation history ending on yesterday, so a realtime merge has to
    /// append today's point.
    pub fn correlation_body_ending_yesterday() -> String {
        let yesterday = chrono::Local::now().date_naive().pred_opt().unwrap();
        format!(
            r#"[{{"date": "{yesterday}", "gold_price": 4000.0, "dollar_index": 101.0}}]"#
        )
    }

    pub async fn mount_get(server: &MockServer, url_path: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(url_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    /// Mounts every endpoint the coordinator touches.
    pub async fn mount_market_endpoints(server: &MockServer) {
        mount_get(server, "/api/gold/stats", STATS_BODY).await;
        mount_get(server, "/api/gold/prices/daily", &daily_body()).await;
        mount_get(
            server,
            "/api/gold/prices/correlation",
            &correlation_body_ending_yesterday(),
        )
        .await;
        mount_get(server, "/api/gold/dollar-realtime", QUOTE_BODY).await;
    }
}

#[test_log::test(tokio::test)]
async fn test_watch_flow_populates_snapshot() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_market_endpoints(&mock_server).await;

    let client = ApiClient::new(&mock_server.uri()).unwrap();
    let handle = CoordinatorHandle::spawn_with_interval(Arc::new(client), Duration::from_secs(30));

    // Initial load plus the immediate quote fetch settle quickly against
    // the local mock.
    tokio::time::sleep(Duration::from_millis(300)).await;

    let snapshot = handle.snapshot().await;
    info!(?snapshot, "Snapshot after initial load");

    let stats = snapshot.stats.value.as_ref().expect("stats should be loaded");
    assert_eq!(stats.current_price, 4012.5);
    assert!(!snapshot.stats.has_error());

    let daily = snapshot.daily.value.expect("daily series should be loaded");
    assert_eq!(daily.len(), 2);

    // The realtime quote was merged onto the correlation history: one
    // appended point carrying today's date, the live dollar index and the
    // prior gold close.
    let correlation = snapshot
        .correlation
        .value
        .expect("correlation series should be loaded");
    assert_eq!(correlation.len(), 2);
    let merged = correlation.last().unwrap();
    assert_eq!(merged.date, Local::now().date_naive());
    assert_eq!(merged.dollar_index, 99.5);
    assert_eq!(merged.gold_price, 4000.0);

    assert_eq!(snapshot.dollar_realtime.unwrap().price, 99.5);
    assert!(snapshot.last_updated.is_some());

    handle.shutdown();
}

#[test_log::test(tokio::test)]
async fn test_refresh_within_window_hits_server_once() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    let mock_server = wiremock::MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/gold/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string(test_utils::STATS_BODY))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri()).unwrap();
    let coordinator = Coordinator::new(Arc::new(client));

    assert_eq!(coordinator.refresh_stats(false).await, Refresh::Fetched);
    assert_eq!(coordinator.refresh_stats(false).await, Refresh::Skipped);
    // MockServer verifies the expected call count on drop.
}

#[test_log::test(tokio::test)]
async fn test_forced_refresh_hits_server_again() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    let mock_server = wiremock::MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/gold/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string(test_utils::STATS_BODY))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri()).unwrap();
    let coordinator = Coordinator::new(Arc::new(client));

    coordinator.refresh_stats(false).await;
    assert_eq!(coordinator.refresh_stats(true).await, Refresh::Fetched);
}

#[test_log::test(tokio::test)]
async fn test_charts_keep_history_when_quote_endpoint_errors() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_get(&mock_server, "/api/gold/prices/daily", &test_utils::daily_body())
        .await;
    test_utils::mount_get(
        &mock_server,
        "/api/gold/prices/correlation",
        &test_utils::correlation_body_ending_yesterday(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/gold/dollar-realtime"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri()).unwrap();
    let coordinator = Coordinator::new(Arc::new(client));

    let outcome = coordinator.refresh_charts(true).await;
    assert_eq!(outcome.daily, Refresh::Fetched);
    assert_eq!(outcome.correlation, Refresh::Fetched);
    assert!(matches!(outcome.merge, QuoteMerge::QuoteUnavailable(_)));

    let snapshot = coordinator.snapshot().await;
    assert!(!snapshot.correlation.has_error());
    // Unmerged history stored as fetched.
    assert_eq!(snapshot.correlation.value.unwrap().len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_stats_failure_preserves_previous_snapshot() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    let mock_server = wiremock::MockServer::start().await;
    let stats_mock = Mock::given(method("GET"))
        .and(path("/api/gold/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string(test_utils::STATS_BODY))
        .expect(1)
        .mount_as_scoped(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri()).unwrap();
    let coordinator = Coordinator::new(Arc::new(client));
    coordinator.refresh_stats(true).await;
    drop(stats_mock);

    // Endpoint now 404s; the refresh fails but the snapshot keeps the
    // stale value.
    assert_eq!(coordinator.refresh_stats(true).await, Refresh::Failed);
    let snapshot = coordinator.snapshot().await;
    assert!(snapshot.stats.has_error());
    assert_eq!(snapshot.stats.value.unwrap().current_price, 4012.5);
}

#[test_log::test(tokio::test)]
async fn test_standalone_quote_merges_into_cached_series() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_market_endpoints(&mock_server).await;

    let client = ApiClient::new(&mock_server.uri()).unwrap();
    let coordinator = Coordinator::new(Arc::new(client));

    coordinator.refresh_charts(true).await;
    // The charts refresh already merged today's point; the standalone
    // quote loop must replace it in place, not append again.
    let outcome = coordinator.refresh_realtime_quote().await;
    assert_eq!(outcome, QuoteMerge::Applied(MergeOutcome::Replaced));

    let snapshot = coordinator.snapshot().await;
    assert_eq!(snapshot.correlation.value.unwrap().len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_summary_command_flow_with_mock() {
    use std::fs;

    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_market_endpoints(&mock_server).await;
    test_utils::mount_get(
        &mock_server,
        "/api/gold/prices/latest",
        r#"{
            "date": "2026-07-31",
            "price": 4001.2,
            "open_price": 3995.0,
            "high_price": 4010.0,
            "low_price": 3989.5,
            "change_percent": 0.28,
            "volume": 121000,
            "updated_at": "2026-07-31T20:00:00Z"
        }"#,
    )
    .await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    let config_content = format!(
        r#"
api:
  base_url: "{}"
"#,
        mock_server.uri()
    );
    fs::write(config_path, &config_content).expect("Failed to write config file");

    let result = goldwatch::run_command(
        goldwatch::AppCommand::Summary,
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Summary command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_factors_command_falls_back_when_unreachable() {
    use std::fs;

    // No mock server mounted for the AI endpoints: both fetches fail and
    // the command must still succeed on static fallback content.
    let mock_server = wiremock::MockServer::start().await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
api:
  base_url: "{}"
"#,
        mock_server.uri()
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");

    let result = goldwatch::run_command(
        goldwatch::AppCommand::Factors { refresh: false },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Factors command should degrade to fallback, got: {:?}",
        result.err()
    );
}
