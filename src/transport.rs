//! Transport seam
//!
//! The pagination core never talks to the network itself. It hands the
//! operation and its parameters to a `Transport` and gets back the decoded
//! response body. `crate::http::HttpClient` is the stock implementation.

use crate::error::Result;
use crate::operation::OperationDescriptor;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Sends one request and returns the decoded response
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `operation` with `params` and return the response body
    async fn send(&self, operation: &OperationDescriptor, params: &Value) -> Result<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, operation: &OperationDescriptor, params: &Value) -> Result<Value> {
        (**self).send(operation, params).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, operation: &OperationDescriptor, params: &Value) -> Result<Value> {
        (**self).send(operation, params).await
    }
}
