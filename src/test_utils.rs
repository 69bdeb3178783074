//! Test utilities and mock factories.
//!
//! This module provides shared testing infrastructure:
//! - Scripted transport mocks
//! - Response fixtures
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::time::Duration;

use crate::api::{AnalysisResponse, BugPrediction, JobStatus};
use crate::error::TransportError;
use crate::poller::PollerConfig;
use crate::traits::MockAnalysisTransport;

/// Poller configuration with the default budget and no sleep.
#[must_use]
pub fn fast_poller_config() -> PollerConfig {
    PollerConfig::new().with_interval(Duration::ZERO)
}

/// A bug prediction fixture.
#[must_use]
pub fn sample_bug() -> BugPrediction {
    BugPrediction {
        bug_type: "NullPointerException".to_string(),
        description: "Dereference of a null user at line 10".to_string(),
        severity: "High".to_string(),
        location: Some("MainActivity.kt:10".to_string()),
        confidence: 0.8,
        explanation: None,
    }
}

/// A `COMPLETED` response carrying [`sample_bug`].
#[must_use]
pub fn completed_response(analysis_id: &str) -> AnalysisResponse {
    AnalysisResponse::new(analysis_id, JobStatus::Completed).with_bugs(vec![sample_bug()])
}

/// Add a poll expectation that returns `responses` in order, once each.
pub fn expect_polls(
    mock: &mut MockAnalysisTransport,
    responses: Vec<Result<AnalysisResponse, TransportError>>,
) {
    let mut queue: VecDeque<_> = responses.into();
    mock.expect_poll()
        .times(queue.len())
        .returning(move |_| queue.pop_front().expect("scripted poll response"));
}

/// Create a mock transport whose polls return `responses` in order.
///
/// `submit` has no expectation and panics if called.
#[must_use]
pub fn scripted_poll(
    responses: Vec<Result<AnalysisResponse, TransportError>>,
) -> MockAnalysisTransport {
    let mut mock = MockAnalysisTransport::new();
    expect_polls(&mut mock, responses);
    mock
}
