//! Paginated request
//!
//! A `PaginatedRequest` is one page of a logical query: the operation, the
//! parameters for this page and, once sent, the response or the failure.
//! Requests are never reused; the next page is always a new request built by
//! `crate::pagination::next_page`.

use crate::error::{Error, Result};
use crate::operation::OperationDescriptor;
use crate::path;
use crate::transport::Transport;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// One page of a paginated query
#[derive(Debug)]
pub struct PaginatedRequest {
    pub(crate) operation: Arc<OperationDescriptor>,
    pub(crate) params: Value,
    pub(crate) data: Option<Value>,
    pub(crate) error: Option<Error>,
    pub(crate) page: usize,
}

impl PaginatedRequest {
    /// Create the first page of a query
    pub fn new(operation: Arc<OperationDescriptor>, params: Value) -> Self {
        Self {
            operation,
            params,
            data: None,
            error: None,
            page: 1,
        }
    }

    /// Set the page size through the operation's limit token
    ///
    /// Operations without a limit token are left untouched.
    #[must_use]
    pub fn with_page_size(mut self, size: u64) -> Self {
        if let Some(limit) = self
            .operation
            .pagination
            .as_ref()
            .and_then(|p| p.limit_token.as_ref())
        {
            path::assign(&mut self.params, limit, Value::from(size));
        }
        self
    }

    /// The operation this request belongs to
    pub fn operation(&self) -> &Arc<OperationDescriptor> {
        &self.operation
    }

    /// Request parameters
    pub fn params(&self) -> &Value {
        &self.params
    }

    /// Mutable request parameters; only meaningful before sending
    pub fn params_mut(&mut self) -> &mut Value {
        &mut self.params
    }

    /// Response body, once sent successfully
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Failure recorded by the last send
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Take the recorded failure out of the request
    pub fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    /// Whether a response has been received
    pub fn is_sent(&self) -> bool {
        self.data.is_some()
    }

    /// 1-based position of this request within its walk
    pub fn page_number(&self) -> usize {
        self.page
    }

    /// Send the request and record the outcome
    ///
    /// The response is stored in `data`, a failure in `error`. Sending again
    /// replaces the previous outcome.
    pub async fn send<T>(&mut self, transport: &T) -> std::result::Result<&Value, &Error>
    where
        T: Transport + ?Sized,
    {
        debug!(
            operation = %self.operation.name,
            page = self.page,
            "Sending page request"
        );
        self.data = None;
        self.error = None;

        match transport.send(&self.operation, &self.params).await {
            Ok(body) => Ok(&*self.data.insert(body)),
            Err(err) => Err(&*self.error.insert(err)),
        }
    }

    /// Consume the request, surfacing whatever failure it carries
    pub fn into_result(mut self) -> Result<()> {
        self.error.take().map_or(Ok(()), Err)
    }
}
