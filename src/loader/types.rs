//! Loader types
//!
//! Declarative service definition types for YAML parsing.

use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpConfig, RateLimiterConfig, RetryPolicy};
use crate::operation::OperationDescriptor;
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

// ============================================================================
// Service Definition
// ============================================================================

/// Top-level service definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServiceDefinition {
    /// Service name
    pub name: String,
    /// Base URL for all requests
    pub base_url: String,
    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpDefinition,
    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Operations exposed by the service
    pub operations: Vec<Arc<OperationDescriptor>>,
}

impl ServiceDefinition {
    /// Look up an operation by name
    pub fn operation(&self, name: &str) -> Result<Arc<OperationDescriptor>> {
        self.operations
            .iter()
            .find(|op| op.name == name)
            .cloned()
            .ok_or_else(|| Error::OperationNotFound {
                name: name.to_string(),
            })
    }

    /// Names of all operations, in definition order
    pub fn operation_names(&self) -> Vec<&str> {
        self.operations.iter().map(|op| op.name.as_str()).collect()
    }

    /// HTTP client configuration for this service
    pub fn http_config(&self) -> Result<HttpConfig> {
        let mut config = HttpConfig::new(Url::parse(&self.base_url)?);
        config.timeout = Duration::from_secs(self.http.timeout_secs);
        config.headers.clone_from(&self.headers);
        config.retry = RetryPolicy {
            max_retries: self.http.max_retries,
            backoff: self.http.backoff,
            initial_backoff: Duration::from_millis(self.http.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.http.max_backoff_ms),
        };
        config.rate_limit.clone_from(&self.http.rate_limit);
        Ok(config)
    }

    /// Build the HTTP transport for this service
    pub fn transport(&self) -> Result<HttpClient> {
        HttpClient::new(self.http_config()?)
    }
}

// ============================================================================
// HTTP Definition
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpDefinition {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum retries per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Backoff strategy between retries
    #[serde(default)]
    pub backoff: BackoffType,
    /// First retry delay in milliseconds
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,
    /// Longest retry delay in milliseconds
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,
    /// Client-side rate limit; none when omitted
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpDefinition {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
            rate_limit: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff() -> u64 {
    100
}

fn default_max_backoff() -> u64 {
    60_000
}
