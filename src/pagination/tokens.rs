//! Continuation token resolution and next-request construction

use crate::path;
use crate::request::PaginatedRequest;
use serde_json::Value;
use tracing::{debug, warn};

/// Continuation tokens for the next page, positionally matching the
/// operation's input tokens. `None` marks a token missing from the response.
pub type PageTokens = Vec<Option<Value>>;

/// Resolve the tokens that seed the next page
///
/// Returns `None` when there is no next page: the request is unsent, the
/// operation is not paginated, the truncation flag is missing or `false`, or
/// none of the output tokens resolved.
pub fn next_page_tokens(request: &PaginatedRequest) -> Option<PageTokens> {
    let pagination = request.operation.pagination.as_ref()?;
    let data = request.data.as_ref()?;

    if let Some(truncation) = &pagination.truncation_token {
        match path::resolve_first(data, truncation) {
            None | Some(Value::Bool(false)) => return None,
            Some(_) => {}
        }
    }

    let tokens: PageTokens = pagination
        .output_tokens
        .iter()
        .map(|output| path::resolve_first(data, output))
        .collect();

    if tokens.iter().all(Option::is_none) {
        return None;
    }

    Some(tokens)
}

/// Whether another page can be requested after this one
///
/// Agrees with [`next_page`]: a token that resolves but cannot be written
/// into the parameters means there is no next page.
pub fn has_next_page(request: &PaginatedRequest) -> bool {
    next_page(request).is_some()
}

/// Build the request for the following page
///
/// The new request shares the operation, deep-copies the parameters and
/// starts unsent. Missing tokens leave the matching input untouched. If a
/// present token has nowhere to go in the parameters (an input path through
/// a scalar or a missing array element) the walk ends here, since the next
/// request would repeat the current one.
pub fn next_page(request: &PaginatedRequest) -> Option<PaginatedRequest> {
    let tokens = next_page_tokens(request)?;
    let pagination = request.operation.pagination.as_ref()?;

    let mut next = PaginatedRequest::new(request.operation.clone(), request.params.clone());
    next.page = request.page + 1;

    for (input, token) in pagination.input_tokens.iter().zip(tokens) {
        let Some(token) = token else { continue };
        if path::assign(&mut next.params, input, token) == 0 {
            warn!(
                operation = %request.operation.name,
                page = request.page,
                path = %input,
                "Continuation token cannot be written into the request, ending walk"
            );
            return None;
        }
    }

    debug!(
        operation = %request.operation.name,
        page = next.page,
        "Built next page request"
    );
    Some(next)
}

impl PaginatedRequest {
    /// Whether another page can be requested after this one
    pub fn has_next_page(&self) -> bool {
        has_next_page(self)
    }

    /// Build the request for the following page, if any
    pub fn next_page(&self) -> Option<PaginatedRequest> {
        next_page(self)
    }
}
