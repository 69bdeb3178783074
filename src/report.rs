//! Human-readable rendering of a terminal [`AnalysisResponse`].
//!
//! Rendering is pure and never fails; absent optional fields are omitted.
//!
//! # Example
//!
//! ```
//! use bughawk_client::api::{AnalysisResponse, JobStatus};
//! use bughawk_client::report::format_report;
//!
//! let text = format_report(&AnalysisResponse::new("abc123", JobStatus::Completed));
//! assert!(text.starts_with("Analysis ID: abc123\nStatus: COMPLETED\n"));
//! ```

use std::fmt;

use crate::api::{AnalysisResponse, BugPrediction, PatchSuggestion};

/// Line shown when the response carries no predicted bugs.
pub const NO_BUGS_LINE: &str = "No specific bugs predicted based on current data.";

const SEPARATOR: &str = "----------------------";

/// Display adapter for an analysis report.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    response: &'a AnalysisResponse,
    code_language: Option<&'a str>,
}

impl<'a> Report<'a> {
    /// Wrap a response for display.
    #[must_use]
    pub const fn new(response: &'a AnalysisResponse) -> Self {
        Self {
            response,
            code_language: None,
        }
    }

    /// Tag patch code fences with a language (e.g., `kotlin`).
    #[must_use]
    pub const fn with_code_language(mut self, language: &'a str) -> Self {
        self.code_language = Some(language);
        self
    }

    fn write_bug(f: &mut fmt::Formatter<'_>, bug: &BugPrediction) -> fmt::Result {
        writeln!(f, "Type: {}", bug.bug_type)?;
        writeln!(f, "Description: {}", bug.description)?;
        writeln!(
            f,
            "Severity: {} (Confidence: {})",
            bug.severity,
            percent(bug.confidence)
        )?;
        if let Some(location) = &bug.location {
            writeln!(f, "Location: {location}")?;
        }
        if let Some(explanation) = &bug.explanation {
            writeln!(f, "Explanation: {explanation}")?;
        }
        writeln!(f, "{SEPARATOR}")
    }

    fn write_patch(&self, f: &mut fmt::Formatter<'_>, patch: &PatchSuggestion) -> fmt::Result {
        writeln!(f, "Description: {}", patch.description)?;
        writeln!(f, "Code:")?;
        writeln!(f, "```{}", self.code_language.unwrap_or_default())?;
        writeln!(f, "{}", patch.suggested_code)?;
        writeln!(f, "```")?;
        if let Some(relevance) = patch.relevance {
            writeln!(f, "Relevance: {}", percent(relevance))?;
        }
        if let Some(explanation) = &patch.explanation {
            writeln!(f, "Explanation: {explanation}")?;
        }
        writeln!(f, "{SEPARATOR}")
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis ID: {}", self.response.analysis_id)?;
        writeln!(f, "Status: {}", self.response.status)?;
        writeln!(f)?;

        let bugs = self.response.bugs();
        if bugs.is_empty() {
            writeln!(f, "{NO_BUGS_LINE}")?;
        } else {
            writeln!(f, "--- Predicted Bugs ---")?;
            for bug in bugs {
                Self::write_bug(f, bug)?;
            }
        }

        let patches = self.response.patches();
        if !patches.is_empty() {
            writeln!(f)?;
            writeln!(f, "--- Suggested Patches ---")?;
            for patch in patches {
                self.write_patch(f, patch)?;
            }
        }
        Ok(())
    }
}

/// Format a fraction in [0, 1] as a percentage with one decimal place.
fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Render a terminal response as display text.
#[must_use]
pub fn format_report(response: &AnalysisResponse) -> String {
    Report::new(response).to_string()
}
