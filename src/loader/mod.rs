//! YAML Loader module
//!
//! Parse service definitions from YAML files.
//!
//! # Overview
//!
//! The loader module provides:
//! - `ServiceDefinition` - base URL, HTTP settings and operation descriptors
//! - `HttpDefinition` - retry, backoff and rate limit settings
//! - YAML parsing with validation

mod parser;
mod types;

pub use parser::{load_service, load_service_from_str};
pub use types::{HttpDefinition, ServiceDefinition};
