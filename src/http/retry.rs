//! Retry policy
//!
//! Decides how long to wait before sending a failed page request again.

use crate::error::Error;
use crate::types::BackoffType;
use reqwest::Response;
use std::time::Duration;

/// How often and how patiently a request is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; 0 disables retrying
    pub max_retries: u32,
    /// Growth of the delay between retries
    pub backoff: BackoffType,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Upper bound for any computed delay
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: BackoffType::Exponential,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Whether `error` on retry number `retry` (0-based) deserves another try
    pub fn should_retry(&self, error: &Error, retry: u32) -> bool {
        retry < self.max_retries && error.is_retryable()
    }

    /// Backoff before retry number `retry` (0-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        let delay = match self.backoff {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self
                .initial_backoff
                .saturating_mul(retry.saturating_add(1)),
            BackoffType::Exponential => self
                .initial_backoff
                .saturating_mul(2u32.saturating_pow(retry)),
        };
        delay.min(self.max_backoff)
    }

    /// Delay before retrying after `error`
    ///
    /// A server-provided `Retry-After` wins over the backoff curve.
    pub fn delay(&self, error: &Error, retry: u32) -> Duration {
        match error {
            Error::RateLimited {
                retry_after_seconds: Some(seconds),
            } => Duration::from_secs(*seconds),
            _ => self.backoff(retry),
        }
    }
}

/// Seconds from a numeric `Retry-After` header
pub(crate) fn retry_after(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
