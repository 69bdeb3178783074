//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading (with `.env` support)
//! - Configuration validation
//! - Default value handling
//! - Conversion into client and poller configurations
//!
//! # Example
//!
//! ```
//! use bughawk_client::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.max_attempts, 3);
//! assert_eq!(config.poll_interval_ms, 1_000);
//! let client = config.client_config();
//! assert_eq!(client.retry_delay_ms, 500);
//! ```

mod validation;

pub use validation::{
    validate_config, MAX_ATTEMPTS, MAX_POLL_ATTEMPTS, MAX_TIMEOUT_MS, MIN_TIMEOUT_MS,
};

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::api::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_MS,
    DEFAULT_TIMEOUT_MS,
};
use crate::error::ConfigError;
use crate::poller::{PollerConfig, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_MS};
use crate::request::RequestBuilder;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default platform identifier sent with requests.
pub const DEFAULT_PLATFORM: &str = "CLI";

/// Default language identifier sent with requests.
pub const DEFAULT_LANGUAGE: &str = "Rust";

/// Application configuration.
///
/// Retry and polling constants are policy, so each one is configurable.
/// Use [`Config::from_env`] to load configuration from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Analysis service base URL.
    pub base_url: String,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Attempts per logical transport operation.
    pub max_attempts: u32,
    /// Delay between transport attempts in milliseconds.
    pub retry_delay_ms: u64,
    /// Poll iterations before timing out.
    pub max_poll_attempts: u32,
    /// Sleep between non-terminal polls in milliseconds.
    pub poll_interval_ms: u64,
    /// Platform identifier.
    pub platform: String,
    /// Language identifier.
    pub language: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (with defaults):
    /// - `BUGHAWK_API_URL`: Service base URL (default: `http://127.0.0.1:8000/api/v1`)
    /// - `LOG_LEVEL`: Logging level (default: `info`)
    /// - `REQUEST_TIMEOUT_MS`: Per-request timeout (default: `30000`)
    /// - `MAX_ATTEMPTS`: Attempts per submit/poll operation (default: `3`)
    /// - `RETRY_DELAY_MS`: Delay between attempts (default: `500`)
    /// - `MAX_POLL_ATTEMPTS`: Polls before timing out (default: `20`)
    /// - `POLL_INTERVAL_MS`: Sleep between polls (default: `1000`)
    /// - `BUGHAWK_PLATFORM`: Platform identifier (default: `CLI`)
    /// - `BUGHAWK_LANGUAGE`: Language identifier (default: `Rust`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric variable does not parse or any
    /// value fails validation (see [`validate_config`]).
    #[must_use = "configuration should be used"]
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let config = Self {
            base_url: env_or("BUGHAWK_API_URL", DEFAULT_BASE_URL),
            log_level: env_or("LOG_LEVEL", DEFAULT_LOG_LEVEL),
            request_timeout_ms: parse_env_u64("REQUEST_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?,
            max_attempts: parse_env_u32("MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
            retry_delay_ms: parse_env_u64("RETRY_DELAY_MS", DEFAULT_RETRY_DELAY_MS)?,
            max_poll_attempts: parse_env_u32("MAX_POLL_ATTEMPTS", DEFAULT_MAX_POLL_ATTEMPTS)?,
            poll_interval_ms: parse_env_u64("POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?,
            platform: env_or("BUGHAWK_PLATFORM", DEFAULT_PLATFORM),
            language: env_or("BUGHAWK_LANGUAGE", DEFAULT_LANGUAGE),
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Transport configuration.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new()
            .with_base_url(&self.base_url)
            .with_timeout_ms(self.request_timeout_ms)
            .with_max_attempts(self.max_attempts)
            .with_retry_delay_ms(self.retry_delay_ms)
    }

    /// Poller configuration.
    #[must_use]
    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig::new()
            .with_max_attempts(self.max_poll_attempts)
            .with_interval(Duration::from_millis(self.poll_interval_ms))
    }

    /// Log filter for the configured level.
    ///
    /// An unparsable `LOG_LEVEL` falls back to [`DEFAULT_LOG_LEVEL`].
    #[must_use]
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    }

    /// Request builder for the configured platform and language.
    #[must_use]
    pub fn request_builder(&self) -> RequestBuilder {
        RequestBuilder::new(&self.platform, &self.language)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            platform: DEFAULT_PLATFORM.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Read a string environment variable, using a default if not set.
fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

/// Parse an environment variable as u64, using a default if not set.
fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}

/// Parse an environment variable as u32, using a default if not set.
fn parse_env_u32(name: &str, default: u32) -> Result<u32, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}
