//! Analysis service client with retry logic.
//!
//! This module provides:
//! - HTTP client for the submit and status endpoints
//! - Fixed-delay retry around each logical operation
//! - Response decoding

#![allow(clippy::missing_errors_doc)]

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::config::ClientConfig;
use super::retry::RetryPolicy;
use super::types::{AnalysisRequest, AnalysisResponse};
use crate::error::TransportError;
use crate::traits::AnalysisTransport;

/// Path of the submit endpoint, relative to the base URL.
const ANALYZE_PATH: &str = "analyze-logs";
/// Path prefix of the status endpoint, relative to the base URL.
const STATUS_PATH: &str = "status";

/// Analysis service client.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: Client,
    base_url: Url,
    config: ClientConfig,
    retry: RetryPolicy,
}

impl AnalysisClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| TransportError::InvalidUrl {
            message: format!("{}: {e}", config.base_url),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl {
                message: format!("{} cannot be used as a base URL", config.base_url),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| TransportError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url,
            retry: config.retry_policy(),
            config,
        })
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build an endpoint URL from path segments.
    ///
    /// Segments are percent-encoded, so an analysis id is always one segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| TransportError::InvalidUrl {
                    message: format!("{} cannot be used as a base URL", self.base_url),
                })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Submit a request with retry logic.
    pub async fn submit(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, TransportError> {
        let url = self.endpoint(&[ANALYZE_PATH])?;
        tracing::info!(
            platform = %request.platform,
            language = %request.language,
            has_logs = request.logs.is_some(),
            has_code = request.code_snippet.is_some(),
            "Submitting analysis request"
        );
        self.retry
            .run("submit", |attempt| {
                self.execute_once(self.client.post(url.clone()).json(request), &url, attempt)
            })
            .await
    }

    /// Fetch job status with retry logic.
    pub async fn poll(&self, analysis_id: &str) -> Result<AnalysisResponse, TransportError> {
        let url = self.endpoint(&[STATUS_PATH, analysis_id])?;
        self.retry
            .run("poll", |attempt| {
                self.execute_once(self.client.get(url.clone()), &url, attempt)
            })
            .await
    }

    /// Execute a single request attempt.
    async fn execute_once<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
        attempt: u32,
    ) -> Result<T, TransportError> {
        let start = Instant::now();
        tracing::debug!(url = %url, attempt, "Sending request");

        let response = request.send().await.map_err(|e| {
            let elapsed_ms = elapsed_ms(start);
            if e.is_timeout() {
                tracing::error!(url = %url, elapsed_ms, error = %e, "Request timed out");
                TransportError::Timeout {
                    timeout_ms: self.config.timeout_ms,
                    message: e.to_string(),
                }
            } else {
                tracing::error!(url = %url, elapsed_ms, error = %e, "Request failed");
                TransportError::Network {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        tracing::debug!(
            url = %url,
            status = %status,
            elapsed_ms = elapsed_ms(start),
            "Response received"
        );

        if !status.is_success() {
            let body = body_text(response.text().await);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| TransportError::Network {
            message: e.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode {
            message: e.to_string(),
        })
    }
}

/// Body text of an error response, or a marker naming the read failure.
fn body_text<E: std::fmt::Display>(result: Result<String, E>) -> String {
    result.unwrap_or_else(|e| format!("<unreadable body: {e}>"))
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl AnalysisTransport for AnalysisClient {
    async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, TransportError> {
        Self::submit(self, request).await
    }

    async fn poll(&self, analysis_id: &str) -> Result<AnalysisResponse, TransportError> {
        Self::poll(self, analysis_id).await
    }
}
