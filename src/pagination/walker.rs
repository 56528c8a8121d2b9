//! Page traversal
//!
//! Callback-driven and stream-driven walks over every page of a query.

use crate::error::Result;
use crate::request::PaginatedRequest;
use crate::transport::Transport;
use futures::stream::{self, BoxStream, StreamExt};
use serde_json::Value;
use tracing::{debug, warn};

/// A page yielded by `PaginatedRequest::into_pages`
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    /// Response body
    pub data: Value,
    /// Whether this is the final page
    pub is_last: bool,
}

/// Send every page of a query, one at a time
///
/// `on_page` receives each response with a flag telling whether it is the
/// last page, and returns `false` to stop early. An early stop is not an
/// error. A send failure ends the walk and is returned as is; pages already
/// handed to `on_page` stay delivered.
pub async fn for_each_page<T, F>(
    request: PaginatedRequest,
    transport: &T,
    mut on_page: F,
) -> Result<()>
where
    T: Transport + ?Sized,
    F: FnMut(&Value, bool) -> bool,
{
    let mut page = request;

    loop {
        if page.send(transport).await.is_err() {
            warn!(
                operation = %page.operation.name,
                page = page.page,
                "Page request failed, stopping walk"
            );
            return page.into_result();
        }

        let next = page.next_page();
        // A successful send always leaves data behind.
        let data = page.data.as_ref().unwrap_or(&Value::Null);

        if !on_page(data, next.is_none()) {
            debug!(
                operation = %page.operation.name,
                page = page.page,
                "Walk stopped by caller"
            );
            return page.into_result();
        }

        let Some(next) = next else {
            debug!(
                operation = %page.operation.name,
                pages = page.page,
                "Walk complete"
            );
            return Ok(());
        };
        page = next;
    }
}

impl PaginatedRequest {
    /// Send every page of this query, see [`for_each_page`]
    pub async fn each_page<T, F>(self, transport: &T, on_page: F) -> Result<()>
    where
        T: Transport + ?Sized,
        F: FnMut(&Value, bool) -> bool,
    {
        for_each_page(self, transport, on_page).await
    }

    /// Walk every page of this query as a lazy stream
    ///
    /// Nothing is sent until the stream is polled, and each following page is
    /// only sent when the next item is requested. A failed send yields one
    /// `Err` item and ends the stream. Dropping the stream stops the walk.
    pub fn into_pages<'a, T>(self, transport: &'a T) -> BoxStream<'a, Result<Page>>
    where
        T: Transport + ?Sized,
    {
        stream::unfold(Some(self), move |pending| async move {
            let mut page = pending?;

            if page.send(transport).await.is_err() {
                warn!(
                    operation = %page.operation.name,
                    page = page.page,
                    "Page request failed, ending stream"
                );
                return page.take_error().map(|err| (Err(err), None));
            }

            let next = page.next_page();
            let item = Page {
                number: page.page,
                data: page.data.take().unwrap_or(Value::Null),
                is_last: next.is_none(),
            };
            Some((Ok(item), next))
        })
        .boxed()
    }
}
