//! Configuration validation.
//!
//! This module provides validation logic for configuration values,
//! ensuring they are within acceptable ranges.

use super::Config;
use crate::error::ConfigError;

/// Minimum allowed timeout in milliseconds (1 second).
pub const MIN_TIMEOUT_MS: u64 = 1000;

/// Maximum allowed timeout in milliseconds (5 minutes).
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Maximum allowed attempts per transport operation.
pub const MAX_ATTEMPTS: u32 = 10;

/// Maximum allowed poll iterations.
pub const MAX_POLL_ATTEMPTS: u32 = 1000;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - `BUGHAWK_API_URL` must be an `http://` or `https://` URL
/// - `REQUEST_TIMEOUT_MS` must be between 1000 and 300000
/// - `MAX_ATTEMPTS` must be between 1 and 10
/// - `MAX_POLL_ATTEMPTS` must be between 1 and 1000
/// - `BUGHAWK_PLATFORM` and `BUGHAWK_LANGUAGE` must not be blank
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidValue {
            var: "BUGHAWK_API_URL".into(),
            reason: "must start with http:// or https://".into(),
        });
    }

    if config.request_timeout_ms < MIN_TIMEOUT_MS || config.request_timeout_ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::InvalidValue {
            var: "REQUEST_TIMEOUT_MS".into(),
            reason: format!("must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS} ms"),
        });
    }

    if !(1..=MAX_ATTEMPTS).contains(&config.max_attempts) {
        return Err(ConfigError::InvalidValue {
            var: "MAX_ATTEMPTS".into(),
            reason: format!("must be between 1 and {MAX_ATTEMPTS}"),
        });
    }

    if !(1..=MAX_POLL_ATTEMPTS).contains(&config.max_poll_attempts) {
        return Err(ConfigError::InvalidValue {
            var: "MAX_POLL_ATTEMPTS".into(),
            reason: format!("must be between 1 and {MAX_POLL_ATTEMPTS}"),
        });
    }

    if config.platform.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "BUGHAWK_PLATFORM".into(),
            reason: "must not be empty".into(),
        });
    }

    if config.language.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "BUGHAWK_LANGUAGE".into(),
            reason: "must not be empty".into(),
        });
    }

    Ok(())
}
