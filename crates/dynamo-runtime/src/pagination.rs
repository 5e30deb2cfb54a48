//! Paginated drain engine.
//!
//! [`drain_pages`] follows continuation cursors until a page arrives without
//! one, concatenating rows in request order. Rules:
//!
//! - an empty page does not end the drain; only a missing cursor does
//! - a fault on any page fails the whole drain and the rows gathered so far
//!   are dropped
//! - no page cap unless [`DrainOptions::max_pages`] is set
//! - a page returning the cursor it was requested with fails the drain

use crate::error::StoreError;
use crate::store::{Page, TableStore};
use crate::trace::{TraceEvent, TraceSink};
use dynamo_core::{Item, QueryRequest};
use std::future::Future;
use std::time::Duration;

/// Knobs for one drain.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrainOptions {
    /// Fail once this many pages were read and more remain.
    pub max_pages: Option<u32>,
    /// Deadline applied to each page request.
    pub page_timeout: Option<Duration>,
}

/// Await `fut`, failing with [`StoreError::Timeout`] after `deadline`.
pub async fn with_deadline<T, Fut>(deadline: Option<Duration>, fut: Fut) -> Result<T, StoreError>
where
    Fut: Future<Output = Result<T, StoreError>>,
{
    match deadline {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| StoreError::Timeout(limit))?,
        None => fut.await,
    }
}

/// Drain every page produced by `fetch`.
///
/// `fetch` receives the cursor to resume after (`None` for the first page).
pub async fn drain_pages<F, Fut>(
    operation: &'static str,
    options: DrainOptions,
    tracer: &dyn TraceSink,
    mut fetch: F,
) -> Result<Vec<Item>, StoreError>
where
    F: FnMut(Option<Item>) -> Fut,
    Fut: Future<Output = Result<Page, StoreError>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<Item> = None;
    let mut page_number: u32 = 0;

    loop {
        if let Some(max) = options.max_pages
            && page_number >= max
        {
            return Err(StoreError::PageLimitExceeded(max));
        }
        page_number += 1;

        let sent = cursor.clone();
        let page = with_deadline(options.page_timeout, fetch(cursor.take())).await?;

        tracer.record(TraceEvent::PageDrained {
            operation,
            page: page_number,
            items: page.items.len(),
            has_more: page.last_evaluated_key.is_some(),
        });

        items.extend(page.items);

        match page.last_evaluated_key {
            None => break,
            Some(next) if sent.as_ref() == Some(&next) => {
                return Err(StoreError::StalledCursor { page: page_number });
            }
            Some(next) => cursor = Some(next),
        }
    }

    Ok(items)
}

/// Drain every page of a query.
pub async fn drain_query(
    operation: &'static str,
    store: &dyn TableStore,
    request: &QueryRequest,
    options: DrainOptions,
    tracer: &dyn TraceSink,
) -> Result<Vec<Item>, StoreError> {
    drain_pages(operation, options, tracer, |cursor| {
        let page_request = request.starting_after(cursor);
        async move { store.query(&page_request).await }
    })
    .await
}
