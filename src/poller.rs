//! Job polling state machine.
//!
//! Starting from the response of a submission, the poller drives the job
//! to a terminal state:
//!
//! ```text
//! QUEUED / IN_PROGRESS ──poll──▶ QUEUED / IN_PROGRESS ──…──▶ TIMED_OUT
//!          │                              │
//!          └──────────────┬───────────────┘
//!                         ▼
//!               COMPLETED │ FAILED
//! ```
//!
//! A poll that fails after the transport's retry policy aborts the loop.
//! Non-terminal statuses sleep for the poll interval and continue.
//! Cancellation is checked before every network call and during every sleep.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::{AnalysisResponse, JobStatus};
use crate::error::{AnalysisError, DEFAULT_FAILURE_MESSAGE};
use crate::traits::AnalysisTransport;

/// Default poll iterations before giving up.
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 20;
/// Default sleep between non-terminal polls in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Poll budget and interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    /// Poll iterations before the job is reported as timed out.
    pub max_attempts: u32,
    /// Sleep between non-terminal polls.
    pub interval: Duration,
}

impl PollerConfig {
    /// Create a poller configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the poll budget.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the poll interval.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// Where a response leaves the state machine.
enum Step {
    Completed(AnalysisResponse),
    Pending(AnalysisResponse),
}

/// Apply the transition table to one response.
fn step(response: AnalysisResponse) -> Result<Step, AnalysisError> {
    match response.status {
        JobStatus::Completed => Ok(Step::Completed(response)),
        JobStatus::Failed => Err(AnalysisError::JobFailed {
            message: response
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
        }),
        JobStatus::Queued | JobStatus::InProgress => Ok(Step::Pending(response)),
    }
}

/// Drives a submitted job to a terminal state.
pub struct JobPoller<T>
where
    T: AnalysisTransport,
{
    transport: T,
    config: PollerConfig,
}

impl<T> JobPoller<T>
where
    T: AnalysisTransport,
{
    /// Create a new poller.
    #[must_use]
    pub const fn new(transport: T, config: PollerConfig) -> Self {
        Self { transport, config }
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// The poll configuration.
    #[must_use]
    pub const fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Drive `initial` to a terminal state without progress reporting.
    ///
    /// # Errors
    ///
    /// See [`JobPoller::drive`].
    pub async fn run(
        &self,
        initial: AnalysisResponse,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResponse, AnalysisError> {
        self.drive(initial, cancel, |_| {}).await
    }

    /// Drive `initial` to a terminal state.
    ///
    /// `on_pending` is called with every non-terminal response, including
    /// `initial`. It is never called after cancellation. Polls always use
    /// the id of `initial`.
    ///
    /// Returns the `COMPLETED` response.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] if:
    /// - The job reports `FAILED` (`JobFailed`)
    /// - A poll fails after all transport attempts (`Polling`)
    /// - The poll budget is spent (`TimedOut`)
    /// - `cancel` fires (`Cancelled`)
    pub async fn drive<F>(
        &self,
        initial: AnalysisResponse,
        cancel: &CancellationToken,
        mut on_pending: F,
    ) -> Result<AnalysisResponse, AnalysisError>
    where
        F: FnMut(&AnalysisResponse) + Send,
    {
        let analysis_id = initial.analysis_id.clone();
        match step(initial)? {
            Step::Completed(done) => return Ok(done),
            Step::Pending(pending) => {
                if cancel.is_cancelled() {
                    return Err(AnalysisError::Cancelled);
                }
                on_pending(&pending);
            }
        }

        let mut attempts = 0;
        while attempts < self.config.max_attempts {
            let response = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tracing::info!(analysis_id = %analysis_id, attempts, "Polling cancelled");
                    return Err(AnalysisError::Cancelled);
                }
                result = self.transport.poll(&analysis_id) => result.map_err(|e| {
                    tracing::error!(analysis_id = %analysis_id, error = %e, "Polling failed");
                    AnalysisError::Polling(e)
                })?,
            };
            attempts += 1;

            match step(response) {
                Ok(Step::Completed(done)) => {
                    tracing::info!(analysis_id = %analysis_id, attempts, "Analysis completed");
                    return Ok(done);
                }
                Ok(Step::Pending(pending)) => {
                    tracing::debug!(
                        analysis_id = %analysis_id,
                        attempt = attempts,
                        status = %pending.status,
                        "Analysis still pending"
                    );
                    if cancel.is_cancelled() {
                        return Err(AnalysisError::Cancelled);
                    }
                    on_pending(&pending);
                }
                Err(e) => {
                    tracing::warn!(analysis_id = %analysis_id, error = %e, "Analysis failed");
                    return Err(e);
                }
            }

            if attempts < self.config.max_attempts {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => {
                        tracing::info!(analysis_id = %analysis_id, attempts, "Polling cancelled");
                        return Err(AnalysisError::Cancelled);
                    }
                    () = tokio::time::sleep(self.config.interval) => {}
                }
            }
        }

        tracing::warn!(analysis_id = %analysis_id, attempts, "Analysis timed out");
        Err(AnalysisError::TimedOut { attempts })
    }
}
