//! Operation descriptor module
//!
//! Static metadata for one kind of remote call.
//!
//! # Overview
//!
//! - `OperationDescriptor` - name, HTTP route and optional pagination metadata
//! - `TokenPaths` - where continuation tokens live in responses and where they
//!   go in the next request
//!
//! Descriptors are validated when built and never change afterwards, so one
//! `Arc<OperationDescriptor>` can back every page of every concurrent walk.

mod types;

pub use types::{OperationDescriptor, TokenPaths};
