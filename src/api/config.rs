//! Analysis client configuration.

#![allow(clippy::missing_const_for_fn)]

use std::time::Duration;

use super::retry::RetryPolicy;

/// Default base URL of the analysis service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";
/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default attempts per logical operation, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default constant delay between attempts in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Client configuration for the analysis service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL including the API version prefix.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Attempts per logical operation, including the first.
    pub max_attempts: u32,
    /// Constant delay between attempts in milliseconds.
    pub retry_delay_ms: u64,
}

impl ClientConfig {
    /// Create a new client configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set attempts per logical operation.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set retry delay in milliseconds.
    #[must_use]
    pub const fn with_retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    /// The retry policy described by this configuration.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_delay_ms, 500);
    }

    #[test]
    fn test_client_config_builder_chain() {
        let config = ClientConfig::new()
            .with_base_url("http://localhost")
            .with_timeout_ms(10_000)
            .with_max_attempts(2)
            .with_retry_delay_ms(50);

        assert_eq!(config.base_url, "http://localhost");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.retry_delay_ms, 50);
    }

    #[test]
    fn test_retry_policy_from_config() {
        let policy = ClientConfig::new().retry_policy();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.delay(), Duration::from_millis(500));
    }
}
