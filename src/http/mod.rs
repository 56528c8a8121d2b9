//! HTTP module
//!
//! The stock `Transport`: an HTTP client bound to one service.
//!
//! # Features
//!
//! - **Retries**: throttling, timeouts and gateway errors are retried with
//!   constant, linear or exponential backoff, honouring `Retry-After`
//! - **Rate Limiting**: token bucket pacing using governor
//! - **Parameter encoding**: query string for `GET`/`DELETE`, JSON body otherwise

mod client;
mod rate_limit;
mod retry;
mod transport;

pub use client::{HttpClient, HttpConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use retry::RetryPolicy;
pub use transport::query_pairs;

#[cfg(test)]
mod tests;
