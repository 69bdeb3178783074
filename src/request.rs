//! Submission request construction.
//!
//! Raw user text is shaped into an [`AnalysisRequest`]: blank inputs become
//! absent, and a request with neither logs nor code is rejected before any
//! network call.

use std::collections::BTreeMap;

use crate::api::AnalysisRequest;
use crate::error::AnalysisError;

/// Message reported when both inputs are blank.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter either logs or a code snippet.";

/// Builds validated [`AnalysisRequest`]s for a fixed platform and language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    platform: String,
    language: String,
    context: BTreeMap<String, String>,
}

impl RequestBuilder {
    /// Create a builder for the given platform and language identifiers.
    #[must_use]
    pub fn new(platform: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            language: language.into(),
            context: BTreeMap::new(),
        }
    }

    /// Add one context entry sent with every request.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Platform identifier.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Language identifier.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Build a request from raw logs and code text.
    ///
    /// Text is kept verbatim when non-blank; only blankness is judged on the
    /// trimmed value.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Validation`] if both inputs are blank.
    pub fn build(
        &self,
        logs: Option<&str>,
        code_snippet: Option<&str>,
    ) -> Result<AnalysisRequest, AnalysisError> {
        let logs = non_blank(logs);
        let code_snippet = non_blank(code_snippet);

        if logs.is_none() && code_snippet.is_none() {
            tracing::debug!("Rejecting request with blank logs and code");
            return Err(AnalysisError::Validation {
                message: EMPTY_INPUT_MESSAGE.to_string(),
            });
        }

        Ok(AnalysisRequest {
            logs,
            code_snippet,
            platform: self.platform.clone(),
            language: self.language.clone(),
            context: (!self.context.is_empty()).then(|| self.context.clone()),
        })
    }
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty()).map(str::to_string)
}
