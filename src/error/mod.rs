//! Error types for the BugHawk client.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level application errors
//! - [`TransportError`]: Failures of a single HTTP operation against the service
//! - [`AnalysisError`]: Terminal outcomes of a submit-and-poll run that are not a report
//! - [`ConfigError`]: Configuration errors
//!
//! All errors implement `Send + Sync` for async compatibility.

use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Transport error.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Analysis error.
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input file could not be read.
    #[error("Input error: {0}")]
    Input(#[from] std::io::Error),
}

/// Errors from one HTTP operation against the analysis service.
///
/// Every variant except [`TransportError::InvalidUrl`] is transient: the
/// retry policy tries the same logical operation again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Network communication error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error.
        message: String,
    },

    /// Request timed out.
    #[error("Request timeout after {timeout_ms}ms: {message}")]
    Timeout {
        /// Timeout duration in milliseconds.
        timeout_ms: u64,
        /// Underlying client error text.
        message: String,
    },

    /// The service answered with a non-2xx status.
    ///
    /// The body is kept verbatim; it is not assumed to be JSON.
    #[error("API error: {status} - {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A 2xx body could not be decoded into the expected shape.
    #[error("Failed to decode response: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },

    /// The request URL could not be built.
    #[error("Invalid URL: {message}")]
    InvalidUrl {
        /// Description of what's invalid.
        message: String,
    },
}

impl TransportError {
    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidUrl { .. })
    }
}

/// Default reason surfaced when the service reports `FAILED` without a message.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Please try again.";

/// Non-report outcomes of an analysis run.
///
/// Callers pattern-match on these instead of catching generic failures.
/// [`AnalysisError::display_message`] resolves every variant to the single
/// human-readable string shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Input rejected before any network call.
    #[error("Validation failed: {message}")]
    Validation {
        /// Why the input was rejected.
        message: String,
    },

    /// Submitting the job failed after all transport attempts.
    #[error("Submission failed: {0}")]
    Submission(TransportError),

    /// Polling the job failed after all transport attempts.
    #[error("Polling failed: {0}")]
    Polling(TransportError),

    /// The service reported the job as `FAILED`.
    #[error("Job failed: {message}")]
    JobFailed {
        /// Server-provided reason.
        message: String,
    },

    /// No terminal status within the poll budget.
    #[error("Timed out after {attempts} poll attempts")]
    TimedOut {
        /// Poll iterations performed.
        attempts: u32,
    },

    /// The run was cancelled by its owner.
    #[error("Analysis cancelled")]
    Cancelled,
}

impl AnalysisError {
    /// Render the user-facing text for this outcome.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::Submission(e) => format!("Error submitting: {e}"),
            Self::Polling(e) => format!("Polling error: {e}"),
            Self::JobFailed { message } => format!("Analysis failed: {message}"),
            Self::TimedOut { .. } => "Analysis timed out. Please check back later.".to_string(),
            Self::Cancelled => "Analysis cancelled.".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
