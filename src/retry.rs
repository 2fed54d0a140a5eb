//! Retry policy for the request orchestrator.
//!
//! Attempts are counted from 0. A call is sent at most `max_retries + 1`
//! times. Between attempts the orchestrator waits for the server's
//! retry-after hint when one was given, otherwise for an exponential
//! backoff capped at `cap`.

use std::time::Duration;

use crate::config::{Config, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BASE_MS, DEFAULT_RETRY_CAP_MS};
use crate::error::ClassifiedError;

/// Retry ceiling and backoff parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base: Duration,
    /// Upper bound for computed delays. Retry-after hints are not capped.
    pub cap: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base: Duration::from_millis(DEFAULT_RETRY_BASE_MS),
            cap: Duration::from_millis(DEFAULT_RETRY_CAP_MS),
        }
    }
}

impl RetryPolicy {
    /// Takes the retry settings from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_retries: config.max_retries,
            base: config.retry_base,
            cap: config.retry_cap,
        }
    }

    /// Returns true if `error`, raised on `attempt`, should be retried.
    #[must_use]
    pub fn should_retry(&self, attempt: u32, error: &ClassifiedError) -> bool {
        error.is_retryable() && attempt < self.max_retries
    }

    /// Wait before the attempt following `attempt`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32, error: &ClassifiedError) -> Duration {
        if let Some(hint) = error.retry_after {
            return hint;
        }
        self.backoff(attempt)
    }

    /// `min(base * 2^attempt, cap)` without overflowing.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base
            .checked_mul(factor)
            .map_or(self.cap, |d| d.min(self.cap))
    }
}
