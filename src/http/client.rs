//! HTTP client for page requests
//!
//! One `HttpClient` talks to one service. `execute` turns an operation and
//! its parameters into a request, paces it, retries it according to the
//! [`RetryPolicy`] and hands back the decoded JSON body.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::retry::{retry_after, RetryPolicy};
use super::transport::encode_params;
use crate::error::{Error, Result};
use crate::operation::OperationDescriptor;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Connection settings for one service
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Root that operation paths are appended to
    pub base_url: Url,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Headers sent with every request
    pub headers: HashMap<String, String>,
    pub retry: RetryPolicy,
    /// No pacing when `None`
    pub rate_limit: Option<RateLimiterConfig>,
}

impl HttpConfig {
    /// Defaults: 30s timeout, [`RetryPolicy::default`], no rate limit
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
            headers: HashMap::new(),
            retry: RetryPolicy::default(),
            rate_limit: None,
        }
    }
}

/// Sends operations to one service over HTTP
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
    retry: RetryPolicy,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("pagewalk/{}", crate::VERSION))
            .default_headers(header_map(&config.headers)?)
            .build()?;

        Ok(Self {
            client,
            rate_limiter: config.rate_limit.as_ref().map(RateLimiter::new),
            base_url: config.base_url,
            timeout: config.timeout,
            retry: config.retry,
        })
    }

    /// Send `params` to `operation` and decode the JSON response
    ///
    /// Retryable failures are retried with backoff until the policy gives
    /// up; the last failure is returned as is.
    pub async fn execute(&self, operation: &OperationDescriptor, params: &Value) -> Result<Value> {
        let url = self.endpoint(&operation.path)?;
        let mut retry = 0;

        loop {
            if let Some(limiter) = &self.rate_limiter {
                limiter.acquire().await;
            }

            let request = self.client.request(operation.method.into(), url.clone());
            let error = match self
                .attempt(encode_params(request, operation.method, params))
                .await
            {
                Ok(body) => {
                    debug!(operation = %operation.name, %url, retry, "Request succeeded");
                    return Ok(body);
                }
                Err(error) => error,
            };

            if !self.retry.should_retry(&error, retry) {
                return Err(error);
            }

            let delay = self.retry.delay(&error, retry);
            warn!(
                operation = %operation.name,
                retry = retry + 1,
                max_retries = self.retry.max_retries,
                ?delay,
                %error,
                "Request failed, retrying"
            );
            tokio::time::sleep(delay).await;
            retry += 1;
        }
    }

    /// One round trip, with every failure mapped onto `Error`
    async fn attempt(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited {
                retry_after_seconds: retry_after(&response),
            });
        }
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        Ok(response.json().await?)
    }

    /// `base_url` joined with an operation path, keeping any base path prefix
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }
}

fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    headers
        .iter()
        .map(|(name, value)| -> Result<(HeaderName, HeaderValue)> {
            let header = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::config(format!("invalid header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::config(format!("invalid value for header '{name}': {e}")))?;
            Ok((header, value))
        })
        .collect()
}
