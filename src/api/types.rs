//! Analysis service request and response types.
//!
//! This module provides:
//! - The submission payload ([`AnalysisRequest`])
//! - Job status values ([`JobStatus`])
//! - The response shared by submit and status lookups ([`AnalysisResponse`])
//!
//! Wire names are `snake_case`. Absent optionals are omitted from the
//! request body rather than sent as `null`.

#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::derive_partial_eq_without_eq)]

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Payload for `POST /analyze-logs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Application logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
    /// Relevant code snippet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    /// Submitting platform (e.g., "Android", "iOS", "CLI").
    pub platform: String,
    /// Source language (e.g., "Kotlin", "Swift").
    pub language: String,
    /// Free-form key/value context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

/// Server-side state of an analysis job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Accepted, not started.
    Queued,
    /// Being analyzed.
    InProgress,
    /// Finished with a report.
    Completed,
    /// Finished without a report.
    Failed,
}

impl JobStatus {
    /// Returns true for `COMPLETED` and `FAILED`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "QUEUED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One predicted bug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BugPrediction {
    /// Bug category label.
    #[serde(rename = "type")]
    pub bug_type: String,
    /// What is wrong.
    pub description: String,
    /// Severity label (e.g., "Low", "Critical").
    pub severity: String,
    /// Where the bug is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// Why the bug was predicted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// One suggested patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchSuggestion {
    /// What the patch does.
    pub description: String,
    /// Replacement code. Older service builds call this `code_diff`.
    #[serde(alias = "code_diff")]
    pub suggested_code: String,
    /// Relevance in [0, 1]. Older service builds omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
    /// Why the patch helps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Response of both `POST /analyze-logs` and `GET /status/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Opaque job identifier, stable for the job's lifetime.
    pub analysis_id: String,
    /// Current job status.
    pub status: JobStatus,
    /// Failure or diagnostic message. Older service builds call this `error_message`.
    ///
    /// A body carrying both names is rejected as a duplicate field.
    #[serde(default, alias = "error_message", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Predicted bugs, in service order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_bugs: Option<Vec<BugPrediction>>,
    /// Suggested patches, in service order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_patches: Option<Vec<PatchSuggestion>>,
    /// Server timestamp, passed through as text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl AnalysisResponse {
    /// Create a response with only id and status set.
    #[must_use]
    pub fn new(analysis_id: impl Into<String>, status: JobStatus) -> Self {
        Self {
            analysis_id: analysis_id.into(),
            status,
            message: None,
            predicted_bugs: None,
            suggested_patches: None,
            timestamp: None,
        }
    }

    /// Set the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set predicted bugs.
    #[must_use]
    pub fn with_bugs(mut self, bugs: Vec<BugPrediction>) -> Self {
        self.predicted_bugs = Some(bugs);
        self
    }

    /// Set suggested patches.
    #[must_use]
    pub fn with_patches(mut self, patches: Vec<PatchSuggestion>) -> Self {
        self.suggested_patches = Some(patches);
        self
    }

    /// Predicted bugs, empty when absent.
    #[must_use]
    pub fn bugs(&self) -> &[BugPrediction] {
        self.predicted_bugs.as_deref().unwrap_or_default()
    }

    /// Suggested patches, empty when absent.
    #[must_use]
    pub fn patches(&self) -> &[PatchSuggestion] {
        self.suggested_patches.as_deref().unwrap_or_default()
    }
}
