//! Bounded retry with exponential backoff
//!
//! The executor is parameterized by attempt budget, backoff and a
//! retryable-error predicate. Errors the predicate rejects are returned
//! immediately; retryable ones are retried until the budget runs out and
//! the last error is returned.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use voxrelay_config::RetryConfig;

/// Delay before retry `n` is `base * 2^n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    base: Duration,
}

impl Backoff {
    pub const fn exponential(base: Duration) -> Self {
        Self { base }
    }

    /// Delay after the failed attempt with zero-based index `attempt`
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Retry executor
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy<E> {
    max_attempts: u32,
    backoff: Backoff,
    retryable: fn(&E) -> bool,
}

impl<E: Display> RetryPolicy<E> {
    /// `max_attempts` counts the first call; zero is treated as one
    pub fn new(max_attempts: u32, backoff: Backoff, retryable: fn(&E) -> bool) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
            retryable,
        }
    }

    pub fn from_config(config: &RetryConfig, retryable: fn(&E) -> bool) -> Self {
        Self::new(config.max_attempts, Backoff::exponential(config.base_delay), retryable)
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or the attempt budget is spent
    ///
    /// The operation receives the zero-based attempt number.
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) if (self.retryable)(&error) && attempt + 1 < self.max_attempts => {
                    let delay = self.backoff.delay(attempt);

                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %error,
                        "Retryable failure, backing off"
                    );

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
