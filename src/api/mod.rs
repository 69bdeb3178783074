//! Analysis service API client.
//!
//! This module provides:
//! - Wire types for the submit and status endpoints
//! - A `reqwest` client implementing [`crate::traits::AnalysisTransport`]
//! - A fixed-delay retry policy applied to every logical operation
//!
//! # Endpoints
//!
//! - `POST {base}/analyze-logs` with an [`AnalysisRequest`] body
//! - `GET {base}/status/{analysis_id}`
//!
//! Both answer with an [`AnalysisResponse`]. Non-2xx bodies are kept as
//! opaque text in [`crate::error::TransportError::Status`].
//!
//! # Example
//!
//! ```no_run
//! use bughawk_client::api::{AnalysisClient, ClientConfig};
//!
//! # async fn run() -> Result<(), bughawk_client::error::TransportError> {
//! let client = AnalysisClient::new(ClientConfig::new().with_base_url("http://localhost:8000/api/v1"))?;
//! let status = client.poll("abc123").await?;
//! println!("{}", status.status);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod retry;
mod types;

pub use client::AnalysisClient;
pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_MS,
    DEFAULT_TIMEOUT_MS,
};
pub use retry::RetryPolicy;
pub use types::{AnalysisRequest, AnalysisResponse, BugPrediction, JobStatus, PatchSuggestion};
