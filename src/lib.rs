//! BugHawk analysis client
//!
//! Submits application logs and code snippets to the BugHawkAI analysis
//! service and polls the asynchronous job until it yields a bug/patch
//! report.
//!
//! # Features
//!
//! - Request validation before any network call
//! - Fixed-delay retry for transient transport failures
//! - Cancellable poll loop with a bounded attempt budget
//! - Plain-text report rendering
//!
//! # Quick Start
//!
//! ```bash
//! BUGHAWK_API_URL=http://localhost:8000/api/v1 ./bughawk --logs-file crash.log
//! ```
//!
//! # Architecture
//!
//! ```text
//! RequestBuilder ──▶ AnalysisClient::submit ──▶ JobPoller ──poll──▶ AnalysisClient::poll
//!                                                   │
//!                                                   ▼
//!                                                 Report
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod analyzer;
pub mod api;
pub mod config;
pub mod error;
pub mod poller;
pub mod report;
pub mod request;
pub mod traits;

#[cfg(test)]
mod test_utils;
