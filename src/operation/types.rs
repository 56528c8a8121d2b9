//! Operation descriptor types

use crate::error::{Error, Result};
use crate::path::PathExpr;
use crate::types::Method;
use serde::{Deserialize, Serialize};

// ============================================================================
// Token Paths
// ============================================================================

/// Pagination metadata of an operation
///
/// `output_tokens[i]` is read from a response and written into the next
/// request at `input_tokens[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TokenPaths {
    /// Request paths that receive continuation tokens
    pub input_tokens: Vec<PathExpr>,
    /// Response paths that carry continuation tokens
    pub output_tokens: Vec<PathExpr>,
    /// Response flag that says whether more pages exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncation_token: Option<PathExpr>,
    /// Request path that carries the page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_token: Option<PathExpr>,
}

impl TokenPaths {
    /// Create token paths from raw expressions
    ///
    /// Fails when an expression does not parse or when the input and output
    /// lists differ in length.
    pub fn new<I, O>(input_tokens: I, output_tokens: O) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        O: IntoIterator,
        O::Item: AsRef<str>,
    {
        let paths = Self {
            input_tokens: parse_all(input_tokens)?,
            output_tokens: parse_all(output_tokens)?,
            truncation_token: None,
            limit_token: None,
        };
        paths.validate("<unnamed>")?;
        Ok(paths)
    }

    /// Set the truncation flag path
    pub fn with_truncation_token(mut self, path: &str) -> Result<Self> {
        self.truncation_token = Some(PathExpr::parse(path)?);
        Ok(self)
    }

    /// Set the page size path
    pub fn with_limit_token(mut self, path: &str) -> Result<Self> {
        self.limit_token = Some(PathExpr::parse(path)?);
        Ok(self)
    }

    /// Check structural consistency
    pub fn validate(&self, operation: &str) -> Result<()> {
        if self.output_tokens.is_empty() {
            return Err(Error::descriptor(
                operation,
                "pagination needs at least one output token",
            ));
        }

        if self.input_tokens.len() != self.output_tokens.len() {
            return Err(Error::descriptor(
                operation,
                format!(
                    "{} input tokens but {} output tokens",
                    self.input_tokens.len(),
                    self.output_tokens.len()
                ),
            ));
        }

        if let Some(path) = self.input_tokens.iter().find(|p| !p.is_writable()) {
            return Err(Error::descriptor(
                operation,
                format!("input token '{path}' is a read-only query"),
            ));
        }

        if let Some(path) = self.limit_token.as_ref().filter(|p| !p.is_writable()) {
            return Err(Error::descriptor(
                operation,
                format!("limit token '{path}' is a read-only query"),
            ));
        }

        Ok(())
    }
}

fn parse_all<T>(paths: T) -> Result<Vec<PathExpr>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    paths
        .into_iter()
        .map(|p| PathExpr::parse(p.as_ref()))
        .collect()
}

// ============================================================================
// Operation Descriptor
// ============================================================================

/// Static description of one remote operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OperationDescriptor {
    /// Operation name, unique within a service
    pub name: String,
    /// HTTP method
    #[serde(default)]
    pub method: Method,
    /// Route relative to the service base URL
    #[serde(default)]
    pub path: String,
    /// Pagination metadata; `None` means the operation returns a single page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<TokenPaths>,
}

impl OperationDescriptor {
    /// Create a non-paginated `GET /` operation
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: Method::GET,
            path: "/".to_string(),
            pagination: None,
        }
    }

    /// Set the HTTP route
    #[must_use]
    pub fn with_route(mut self, method: Method, path: impl Into<String>) -> Self {
        self.method = method;
        self.path = path.into();
        self
    }

    /// Attach pagination metadata, validating it against this operation
    pub fn with_pagination(mut self, pagination: TokenPaths) -> Result<Self> {
        pagination.validate(&self.name)?;
        self.pagination = Some(pagination);
        Ok(self)
    }

    /// Whether responses of this operation can continue on another page
    pub fn is_paginated(&self) -> bool {
        self.pagination.is_some()
    }

    /// Validate the whole descriptor
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::descriptor("", "operation name cannot be empty"));
        }
        match &self.pagination {
            Some(pagination) => pagination.validate(&self.name),
            None => Ok(()),
        }
    }
}
