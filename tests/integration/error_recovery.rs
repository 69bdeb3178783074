//! Error recovery and edge case tests.
//!
//! Tests how transient failures are retried and how terminal failures are
//! surfaced to the caller.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bughawk_client::analyzer::Analyzer;
use bughawk_client::api::{AnalysisClient, ClientConfig};
use bughawk_client::error::{AnalysisError, TransportError};
use bughawk_client::poller::PollerConfig;
use bughawk_client::request::RequestBuilder;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn analyzer_for(server: &MockServer) -> Analyzer<AnalysisClient> {
    let client = AnalysisClient::new(
        ClientConfig::new()
            .with_base_url(format!("{}/api/v1", server.uri()))
            .with_max_attempts(3)
            .with_retry_delay_ms(5),
    )
    .expect("client");
    Analyzer::new(
        client,
        RequestBuilder::new("iOS", "Swift"),
        PollerConfig::new().with_interval(Duration::from_millis(1)),
    )
}

async fn mount_queued_submit(server: &MockServer, analysis_id: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/analyze-logs"))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_json(json!({"analysis_id": analysis_id, "status": "QUEUED"})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_submit_recovers_after_transient_failures() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = Arc::clone(&calls);

    Mock::given(method("POST"))
        .and(path("/api/v1/analyze-logs"))
        .respond_with(move |_req: &wiremock::Request| {
            match calls_clone.fetch_add(1, Ordering::SeqCst) {
                0 => ResponseTemplate::new(502).set_body_string("bad gateway"),
                1 => ResponseTemplate::new(200).set_body_string("not json"),
                _ => ResponseTemplate::new(200).set_body_json(json!({
                    "analysis_id": "retry-ok",
                    "status": "COMPLETED"
                })),
            }
        })
        .mount(&server)
        .await;

    let report = analyzer_for(&server)
        .analyze(Some("crash"), None, &CancellationToken::new())
        .await
        .expect("report after retries");

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(report.response.analysis_id, "retry-ok");
}

#[tokio::test]
async fn test_submit_fails_with_last_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/analyze-logs"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(3)
        .mount(&server)
        .await;

    let err = analyzer_for(&server)
        .analyze(Some("crash"), None, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AnalysisError::Submission(TransportError::Status {
            status: 503,
            body: "maintenance".to_string(),
        })
    );
    assert_eq!(
        err.display_message(),
        "Error submitting: API error: 503 - maintenance"
    );
}

#[tokio::test]
async fn test_poll_error_aborts_without_further_polls() {
    let server = MockServer::start().await;
    mount_queued_submit(&server, "gone").await;

    // One logical poll = three attempts, then the loop stops.
    Mock::given(method("GET"))
        .and(path("/api/v1/status/gone"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("Analysis ID not found or expired"),
        )
        .expect(3)
        .mount(&server)
        .await;

    let text = analyzer_for(&server)
        .analyze_to_text(Some("crash"), None, &CancellationToken::new())
        .await;

    assert_eq!(
        text,
        "Polling error: API error: 404 - Analysis ID not found or expired"
    );
}

#[tokio::test]
async fn test_job_failed_on_poll_surfaces_server_message() {
    let server = MockServer::start().await;
    mount_queued_submit(&server, "doomed").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/status/doomed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "analysis_id": "doomed",
            "status": "FAILED",
            "error_message": "LLM service unavailable"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = analyzer_for(&server)
        .analyze_to_text(Some("crash"), None, &CancellationToken::new())
        .await;

    assert_eq!(text, "Analysis failed: LLM service unavailable");
}

#[tokio::test]
async fn test_blank_input_never_reaches_service() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let text = analyzer_for(&server)
        .analyze_to_text(Some(" \n "), None, &CancellationToken::new())
        .await;

    assert_eq!(text, "Please enter either logs or a code snippet.");
}
