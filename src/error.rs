//! Error types for pagewalk
//!
//! Failures fall into three groups: a service definition or descriptor that
//! cannot be used, a page request that failed on the way to or from the
//! service, and local I/O. Running out of pages is not an error: it shows
//! up as `None` from `next_page` or `is_last = true` in a traversal.

use thiserror::Error;

/// Every failure pagewalk reports
#[derive(Debug, Error)]
pub enum Error {
    // Service definitions and descriptors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("YAML error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Malformed JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid descriptor for operation '{operation}': {message}")]
    Descriptor { operation: String, message: String },

    #[error("Operation '{name}' not found")]
    OperationNotFound { name: String },

    #[error("Invalid path expression '{path}': {message}")]
    PathSyntax { path: String, message: String },

    #[error("Invalid base URL or route: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // Page requests
    #[error("Request could not be completed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error(
        "Rate limited{}",
        .retry_after_seconds.map(|s| format!(", retry after {s}s")).unwrap_or_default()
    )]
    RateLimited { retry_after_seconds: Option<u64> },

    #[error("No response within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Failure raised by a caller-supplied transport
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    // Local
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<Error>,
    },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn descriptor(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Descriptor {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn path_syntax(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PathSyntax {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Whether sending the same request again may succeed
    ///
    /// Throttling, timeouts, dropped connections and gateway-style 5xx
    /// statuses qualify. Undecodable bodies and 4xx statuses do not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            Error::HttpStatus { status, .. } => {
                matches!(*status, 429 | 500 | 502 | 503 | 504 | 520..=524)
            }
            _ => false,
        }
    }
}

/// Result type alias for pagewalk
pub type Result<T> = std::result::Result<T, Error>;

/// Prefix an error with what was being attempted
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Like `context`, building the message only on failure
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.with_context(|| context.into())
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Context {
            context: f(),
            source: Box::new(e.into()),
        })
    }
}
