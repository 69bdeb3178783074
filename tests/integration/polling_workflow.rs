//! Polling workflow tests.
//!
//! Tests the poll budget, cooperative cancellation, and independence of
//! concurrent analyses.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use bughawk_client::analyzer::Analyzer;
use bughawk_client::api::{AnalysisClient, ClientConfig};
use bughawk_client::error::AnalysisError;
use bughawk_client::poller::PollerConfig;
use bughawk_client::request::RequestBuilder;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn analyzer_with(server: &MockServer, poller: PollerConfig) -> Analyzer<AnalysisClient> {
    let client = AnalysisClient::new(
        ClientConfig::new()
            .with_base_url(format!("{}/api/v1", server.uri()))
            .with_retry_delay_ms(1),
    )
    .expect("client");
    Analyzer::new(client, RequestBuilder::new("Android", "Kotlin"), poller)
}

async fn mount_job(server: &MockServer, logs: &str, analysis_id: &str, final_status: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/analyze-logs"))
        .and(body_partial_json(json!({"logs": logs})))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_json(json!({"analysis_id": analysis_id, "status": "QUEUED"})),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/status/{analysis_id}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"analysis_id": analysis_id, "status": final_status})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_poll_budget_exhausted_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/analyze-logs"))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_json(json!({"analysis_id": "slow", "status": "QUEUED"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/status/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"analysis_id": "slow", "status": "QUEUED"})),
        )
        .expect(20)
        .mount(&server)
        .await;

    let analyzer = analyzer_with(
        &server,
        PollerConfig::new().with_interval(Duration::from_millis(1)),
    );
    let err = analyzer
        .analyze(Some("crash"), None, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err, AnalysisError::TimedOut { attempts: 20 });
    assert_eq!(
        err.display_message(),
        "Analysis timed out. Please check back later."
    );
}

#[tokio::test]
async fn test_cancellation_stops_polling() {
    let server = MockServer::start().await;
    mount_job(&server, "hang", "hang-1", "IN_PROGRESS").await;

    let analyzer = Arc::new(analyzer_with(
        &server,
        PollerConfig::new().with_interval(Duration::from_secs(60)),
    ));
    let cancel = CancellationToken::new();

    let task = {
        let analyzer = Arc::clone(&analyzer);
        let cancel = cancel.clone();
        tokio::spawn(async move { analyzer.analyze(Some("hang"), None, &cancel).await })
    };

    // Give the task time to submit and reach its first sleep.
    tokio::time::sleep(Duration::from_millis(200)).await;
    cancel.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("task finished promptly")
        .expect("task did not panic");
    assert_eq!(result.unwrap_err(), AnalysisError::Cancelled);

    let polls = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == "GET")
        .count();
    assert_eq!(polls, 1);
}

#[tokio::test]
async fn test_concurrent_analyses_are_independent() {
    let server = MockServer::start().await;
    mount_job(&server, "first", "job-a", "COMPLETED").await;
    mount_job(&server, "second", "job-b", "FAILED").await;

    let analyzer = analyzer_with(
        &server,
        PollerConfig::new().with_interval(Duration::from_millis(1)),
    );
    let cancel = CancellationToken::new();

    let (a, b) = tokio::join!(
        analyzer.analyze(Some("first"), None, &cancel),
        analyzer.analyze(Some("second"), None, &cancel),
    );

    assert_eq!(a.unwrap().response.analysis_id, "job-a");
    assert_eq!(
        b.unwrap_err().display_message(),
        "Analysis failed: Please try again."
    );
}
