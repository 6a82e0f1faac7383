//! Cursor pagination bookkeeping.
//!
//! The indexer paginates forward with opaque cursors. [`compute_pagination`]
//! is a pure projection of one response; [`Paginator`] keeps the cursor
//! history so a screen can also step back, and carries the total count that
//! only the first page reports.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Opaque forward-pagination token handed out by the indexer.
///
/// There is no public constructor: a cursor can only come out of a
/// deserialized response.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `pageInfo` block of a GraphQL connection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub end_cursor: Option<Cursor>,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
}

/// A GraphQL connection: `{ nodes, pageInfo, totalCount? }`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<R> {
    pub nodes: Vec<R>,
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// What a collection request was issued with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationOptions {
    pub limit: u32,
    /// Rows before this page; client-side bookkeeping, not sent upstream.
    pub offset: u64,
    pub after: Option<Cursor>,
}

impl PaginationOptions {
    pub fn first_page(limit: u32) -> Self {
        Self {
            limit,
            offset: 0,
            after: None,
        }
    }

    /// The total count is only asked for on the first page.
    pub fn wants_total_count(&self) -> bool {
        self.after.is_none()
    }
}

/// One page of transformed items plus its page-info envelope.
#[derive(Clone, Debug)]
pub struct ItemsResponse<T> {
    pub data: Vec<T>,
    pub end_cursor: Option<Cursor>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub total_count: Option<u64>,
}

impl<T> ItemsResponse<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ItemsResponse<U> {
        ItemsResponse {
            data: self.data.into_iter().map(f).collect(),
            end_cursor: self.end_cursor,
            has_next_page: self.has_next_page,
            has_previous_page: self.has_previous_page,
            total_count: self.total_count,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u32,
    /// Cursor this page was requested with.
    pub after: Option<Cursor>,
    /// Cursor to request the following page with.
    pub end_cursor: Option<Cursor>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub total_count: Option<u64>,
}

/// Project one response and the options it was requested with into a
/// [`Pagination`]. Holds no state across calls.
pub fn compute_pagination<T>(response: &ItemsResponse<T>, options: &PaginationOptions) -> Pagination {
    Pagination {
        offset: options.offset,
        limit: options.limit,
        after: options.after.clone(),
        end_cursor: response.end_cursor.clone(),
        has_next_page: response.has_next_page,
        has_previous_page: response.has_previous_page,
        total_count: response.total_count,
    }
}

/// Turn a connection into an [`ItemsResponse`], transforming each node.
///
/// A `totalCount` on a non-first page is ignored so that callers always
/// carry the first page's value forward.
pub fn extract_items<R, T, F>(connection: Connection<R>, options: &PaginationOptions, transform: F) -> Result<ItemsResponse<T>>
where
    F: FnMut(R) -> Result<T>,
{
    let data = connection.nodes.into_iter().map(transform).collect::<Result<Vec<_>>>()?;
    Ok(ItemsResponse {
        data,
        end_cursor: connection.page_info.end_cursor,
        has_next_page: connection.page_info.has_next_page,
        has_previous_page: connection.page_info.has_previous_page,
        total_count: if options.wants_total_count() { connection.total_count } else { None },
    })
}

/// Replace the `__TOTAL_COUNT__` marker in a connection query with
/// `totalCount` on the first page and nothing afterwards.
pub fn with_total_count(query: &str, options: &PaginationOptions) -> String {
    query.replace("__TOTAL_COUNT__", if options.wants_total_count() { "totalCount" } else { "" })
}

/// Page navigation over forward-only cursors.
#[derive(Clone, Debug)]
pub struct Paginator {
    limit: u32,
    /// `after` cursor of every page visited so far; the last one is current.
    history: Vec<Option<Cursor>>,
    total_count: Option<u64>,
    current: Option<Pagination>,
}

impl Paginator {
    pub fn new(limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            history: vec![None],
            total_count: None,
            current: None,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Options for the page currently pointed at.
    pub fn options(&self) -> PaginationOptions {
        let page = self.history.len().saturating_sub(1) as u64;
        PaginationOptions {
            limit: self.limit,
            offset: page * self.limit as u64,
            after: self.history.last().cloned().flatten(),
        }
    }

    /// Pagination of the last settled page.
    pub fn pagination(&self) -> Option<&Pagination> {
        self.current.as_ref()
    }

    /// Record a response for the current page.
    pub fn settle<T>(&mut self, response: &ItemsResponse<T>) -> Pagination {
        let mut pagination = compute_pagination(response, &self.options());
        match pagination.total_count {
            Some(total) => self.total_count = Some(total),
            None => pagination.total_count = self.total_count,
        }
        pagination.has_previous_page |= self.history.len() > 1;
        self.current = Some(pagination.clone());
        pagination
    }

    /// Advance to the following page, if the last response said there is one.
    pub fn next(&mut self) -> Option<PaginationOptions> {
        let current = self.current.as_ref()?;
        if !current.has_next_page {
            return None;
        }
        let cursor = current.end_cursor.clone();
        self.history.push(cursor);
        self.current = None;
        Some(self.options())
    }

    pub fn previous(&mut self) -> Option<PaginationOptions> {
        if self.history.len() <= 1 {
            return None;
        }
        self.history.pop();
        self.current = None;
        Some(self.options())
    }

    /// Back to the first page, forgetting the known total. Used when the
    /// filter or sort changes.
    pub fn reset(&mut self) {
        self.history = vec![None];
        self.total_count = None;
        self.current = None;
    }
}
