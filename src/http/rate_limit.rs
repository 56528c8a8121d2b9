//! Client-side request pacing
//!
//! A long walk sends one request per page back to back. The governor token
//! bucket keeps that under the service's advertised rate.

use governor::{DefaultDirectRateLimiter, Quota};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Requests allowed per second, plus how many may go out at once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    pub requests_per_second: u32,
    #[serde(default = "single_request", alias = "burst")]
    pub burst_size: u32,
}

fn single_request() -> u32 {
    1
}

impl RateLimiterConfig {
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }

    /// Zero rates and bursts are raised to one.
    fn quota(&self) -> Quota {
        let per_second = NonZeroU32::new(self.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.burst_size).unwrap_or(NonZeroU32::MIN);
        Quota::per_second(per_second).allow_burst(burst)
    }
}

/// Paces the requests of one client
pub struct RateLimiter {
    bucket: DefaultDirectRateLimiter,
}

impl RateLimiter {
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            bucket: governor::RateLimiter::direct(config.quota()),
        }
    }

    /// Wait for a free slot
    pub async fn acquire(&self) {
        self.bucket.until_ready().await;
    }
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RateLimiter")
    }
}
