//! Trait definitions for mockable dependencies.
//!
//! [`AnalysisTransport`] abstracts the two HTTP operations of the analysis
//! service so the poller and analyzer can run against a mock.
//!
//! # Mocking
//!
//! The trait is annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates `MockAnalysisTransport` for unit tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{AnalysisRequest, AnalysisResponse};
use crate::error::TransportError;

/// Transport for the analysis service.
///
/// Implementations perform one logical operation per call, including any
/// retry policy. Errors returned here are final for that operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Submit a request (`POST /analyze-logs`).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] once every attempt has failed.
    async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, TransportError>;

    /// Fetch the current status of a job (`GET /status/{analysis_id}`).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] once every attempt has failed.
    async fn poll(&self, analysis_id: &str) -> Result<AnalysisResponse, TransportError>;
}

#[async_trait]
impl<T: AnalysisTransport + ?Sized> AnalysisTransport for Arc<T> {
    async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, TransportError> {
        self.as_ref().submit(request).await
    }

    async fn poll(&self, analysis_id: &str) -> Result<AnalysisResponse, TransportError> {
        self.as_ref().poll(analysis_id).await
    }
}
