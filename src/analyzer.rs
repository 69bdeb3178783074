//! End-to-end analysis: build, submit, poll, render.
//!
//! [`Analyzer`] owns one request builder and one poller. Each call to
//! [`Analyzer::analyze`] is an independent submission with its own
//! analysis id; concurrent calls share no mutable state.
//!
//! Submissions carry no idempotency key. A submit whose response is lost
//! after the service accepted it is retried as a new request and can
//! create a duplicate job.

use tokio_util::sync::CancellationToken;

use crate::api::AnalysisResponse;
use crate::error::AnalysisError;
use crate::poller::{JobPoller, PollerConfig};
use crate::report::Report;
use crate::request::RequestBuilder;
use crate::traits::AnalysisTransport;

/// A completed analysis and its rendered text.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// The terminal `COMPLETED` response.
    pub response: AnalysisResponse,
    /// Human-readable report.
    pub text: String,
}

/// Resolve any analysis outcome to the text shown to the user.
#[must_use]
pub fn render_outcome(outcome: &Result<AnalysisReport, AnalysisError>) -> String {
    match outcome {
        Ok(report) => report.text.clone(),
        Err(e) => e.display_message(),
    }
}

/// Submit-and-poll client for one platform/language pair.
pub struct Analyzer<T>
where
    T: AnalysisTransport,
{
    builder: RequestBuilder,
    poller: JobPoller<T>,
    code_language: String,
}

impl<T> Analyzer<T>
where
    T: AnalysisTransport,
{
    /// Create a new analyzer.
    #[must_use]
    pub fn new(transport: T, builder: RequestBuilder, poller_config: PollerConfig) -> Self {
        let code_language = builder.language().to_lowercase();
        Self {
            builder,
            poller: JobPoller::new(transport, poller_config),
            code_language,
        }
    }

    /// Run one analysis.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] if:
    /// - Both inputs are blank (`Validation`, no network call)
    /// - Submission fails after all transport attempts (`Submission`)
    /// - Any poller outcome other than `COMPLETED`
    pub async fn analyze(
        &self,
        logs: Option<&str>,
        code_snippet: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<AnalysisReport, AnalysisError> {
        self.analyze_with_progress(logs, code_snippet, cancel, |_| {})
            .await
    }

    /// Run one analysis, reporting every non-terminal response.
    ///
    /// # Errors
    ///
    /// See [`Analyzer::analyze`].
    pub async fn analyze_with_progress<F>(
        &self,
        logs: Option<&str>,
        code_snippet: Option<&str>,
        cancel: &CancellationToken,
        on_pending: F,
    ) -> Result<AnalysisReport, AnalysisError>
    where
        F: FnMut(&AnalysisResponse) + Send,
    {
        let request = self.builder.build(logs, code_snippet)?;

        let submitted = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(AnalysisError::Cancelled),
            result = self.poller.transport().submit(&request) => result.map_err(|e| {
                tracing::error!(error = %e, "Submission failed");
                AnalysisError::Submission(e)
            })?,
        };

        tracing::info!(
            analysis_id = %submitted.analysis_id,
            status = %submitted.status,
            "Analysis submitted"
        );

        let response = self.poller.drive(submitted, cancel, on_pending).await?;
        let text = Report::new(&response)
            .with_code_language(&self.code_language)
            .to_string();
        Ok(AnalysisReport { response, text })
    }

    /// Run one analysis and resolve the outcome to display text.
    pub async fn analyze_to_text(
        &self,
        logs: Option<&str>,
        code_snippet: Option<&str>,
        cancel: &CancellationToken,
    ) -> String {
        render_outcome(&self.analyze(logs, code_snippet, cancel).await)
    }
}
