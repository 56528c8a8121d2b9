//! Pagination module
//!
//! Turns a sequence of token-linked requests into one walk over all pages.
//!
//! # Overview
//!
//! - `next_page_tokens` / `has_next_page` - inspect a sent request for
//!   continuation tokens
//! - `next_page` - build the unsent request for the following page
//! - `for_each_page` - send pages one after another, handing each to a
//!   callback that may stop the walk
//! - `PaginatedRequest::into_pages` - the same walk as a lazy `Stream`
//!
//! Pages are strictly sequential: a page's parameters depend on the previous
//! page's response, so there is never more than one request in flight.

mod tokens;
mod walker;

pub use tokens::{has_next_page, next_page, next_page_tokens, PageTokens};
pub use walker::{for_each_page, Page};
