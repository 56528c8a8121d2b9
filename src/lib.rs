//! # pagewalk
//!
//! Walk a paginated remote operation as one lazily advancing sequence of
//! pages, without tracking continuation tokens by hand.
//!
//! ## Features
//!
//! - **Token-driven pagination**: continuation tokens are read from each
//!   response by path and written into the next request's parameters
//! - **Truncation flags**: an explicit "more pages" flag can end the walk
//! - **Callback or stream**: `for_each_page` with early stop, or a lazy `Stream`
//! - **HTTP transport**: retries, backoff and rate limiting out of the box
//! - **YAML service definitions**: declare operations and their token paths
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagewalk::{load_service, PaginatedRequest, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let service = load_service("services/tables.yaml")?;
//!     let transport = service.transport()?;
//!
//!     let request = PaginatedRequest::new(
//!         service.operation("ListTables")?,
//!         serde_json::json!({ "Limit": 100 }),
//!     );
//!
//!     request
//!         .each_page(&transport, |page, is_last| {
//!             println!("{page} (last: {is_last})");
//!             true
//!         })
//!         .await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  for_each_page / into_pages        (pagination)             │
//! │  has_next_page → next_page → send → callback → ...          │
//! └───────────────┬─────────────────────────────┬───────────────┘
//!                 │                             │
//! ┌───────────────┴───────────┐   ┌─────────────┴───────────────┐
//! │ PaginatedRequest          │   │ Transport                   │
//! │ OperationDescriptor       │   │ HttpClient::execute         │
//! │ PathExpr resolve / assign │   │ retry · backoff · governor  │
//! └───────────────────────────┘   └─────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Path expressions over JSON values
pub mod path;

/// Operation descriptors
pub mod operation;

/// Paginated requests
pub mod request;

/// Transport trait
pub mod transport;

/// Token resolution and page traversal
pub mod pagination;

/// HTTP client and transport
pub mod http;

/// YAML loader for service definitions
pub mod loader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use loader::{load_service, load_service_from_str, ServiceDefinition};
pub use operation::{OperationDescriptor, TokenPaths};
pub use pagination::{for_each_page, has_next_page, next_page, Page};
pub use path::PathExpr;
pub use request::PaginatedRequest;
pub use transport::Transport;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
