//! CLI module
//!
//! Command-line interface for walking paginated operations.
//!
//! # Commands
//!
//! - `operations` - List operations of a service
//! - `validate` - Validate a service definition
//! - `walk` - Fetch every page of an operation

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
