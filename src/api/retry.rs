//! Fixed-delay retry policy for transport operations.
//!
//! Each logical operation gets up to `max_attempts` tries with the same
//! delay between them. No backoff, no jitter. The first success returns
//! immediately; after the last failure the last error is surfaced.

use std::future::Future;
use std::time::Duration;

use crate::error::TransportError;

/// Attempt budget and inter-attempt delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Create a policy. An attempt budget of zero is treated as one.
    #[must_use]
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        let max_attempts = if max_attempts == 0 { 1 } else { max_attempts };
        Self {
            max_attempts,
            delay,
        }
    }

    /// Attempts per logical operation, including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay between attempts.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `attempt` until it succeeds or the budget is spent.
    ///
    /// `attempt` receives the 1-based attempt number. Non-retryable errors
    /// are returned at once.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt: F) -> Result<T, TransportError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        let mut number = 1;
        loop {
            match attempt(number).await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) if number >= self.max_attempts => {
                    tracing::error!(
                        operation,
                        attempts = number,
                        error = %e,
                        "Transport attempts exhausted"
                    );
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!(
                        operation,
                        attempt = number,
                        delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "Attempt failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    number += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(500))
    }
}
