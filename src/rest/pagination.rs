//! Lazy pagination over the API's two list protocols.
//!
//! RideWithGPS list endpoints come in two generations with incompatible
//! pagination contracts:
//!
//! - **current (`/api/v1/`)**: `page`/`page_size` request parameters, with a
//!   `meta.pagination.next_page_url` continuation indicator in the response
//! - **legacy (everything else)**: `offset`/`limit` request parameters, with
//!   a flat `results_count` total in the response
//!
//! [`ListIter`] hides the difference behind one pull-based iterator. Which
//! protocol applies is a structural property of the path, resolved once per
//! `list` call as a [`Generation`] and threaded through the cursor — never
//! re-inspected per page and never inferred from response content.
//!
//! A network request is issued only when the previously buffered page is
//! exhausted, so stopping consumption stops the requests.

use std::collections::VecDeque;

use serde_json::Value;

use crate::clients::errors::ClientError;
use crate::clients::http_request::Params;
use crate::clients::http_response::PageMeta;
use crate::rest::RwgpsClient;

/// The default page size for current-generation requests, and the fixed page
/// size for legacy requests.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// The API generation a path belongs to, deciding the pagination protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Generation {
    /// Current generation: `/api/v1/` paths, page/page_size pagination.
    V1,
    /// Legacy generation: offset/limit pagination.
    Legacy,
}

impl Generation {
    /// Resolves the generation from the structure of the path.
    #[must_use]
    pub fn of_path(path: &str) -> Self {
        if path.contains("/api/v1/") {
            Self::V1
        } else {
            Self::Legacy
        }
    }
}

fn param_u64(params: &Params, key: &str) -> Option<u64> {
    params.get(key).and_then(Value::as_u64)
}

/// Per-protocol cursor state. Exactly one shape is active per list call.
#[derive(Clone, Debug)]
enum Cursor {
    /// Current generation: next page number and the requested page size.
    Paged { page: u64, page_size: u64 },
    /// Legacy generation: offset of the next item to request.
    Offset { offset: u64 },
}

/// A lazy iterator over the items of a list endpoint.
///
/// Created by [`RwgpsClient::list`]. Yields `Result<Value, ClientError>`:
/// `Ok` per item in server order, or a single `Err` if the transport fails
/// mid-iteration, after which the sequence ends.
///
/// An endpoint whose response lacks the result key (or carries an empty item
/// array) ends the sequence gracefully — endpoint variance is end-of-data,
/// not an error.
#[derive(Debug)]
pub struct ListIter<'a> {
    client: &'a RwgpsClient,
    path: String,
    params: Params,
    result_key: String,
    limit: Option<u64>,
    fetched: u64,
    cursor: Cursor,
    buffer: VecDeque<Value>,
    done: bool,
}

impl<'a> ListIter<'a> {
    pub(crate) fn new(
        client: &'a RwgpsClient,
        path: String,
        params: Params,
        limit: Option<u64>,
        result_key: String,
    ) -> Self {
        let cursor = match Generation::of_path(&path) {
            Generation::V1 => Cursor::Paged {
                page: param_u64(&params, "page").unwrap_or(1),
                page_size: param_u64(&params, "page_size").unwrap_or(DEFAULT_PAGE_SIZE),
            },
            // Legacy requests always use the fixed page size, independent of
            // any caller-supplied page_size.
            Generation::Legacy => Cursor::Offset {
                offset: param_u64(&params, "offset").unwrap_or(0),
            },
        };

        Self {
            client,
            path,
            params,
            result_key,
            limit,
            fetched: 0,
            cursor,
            buffer: VecDeque::new(),
            done: false,
        }
    }

    /// The page size the active protocol would request, before limit capping.
    const fn full_page_size(&self) -> u64 {
        match self.cursor {
            Cursor::Paged { page_size, .. } => page_size,
            Cursor::Offset { .. } => DEFAULT_PAGE_SIZE,
        }
    }

    /// Fetches the next page into the buffer, or marks the iteration done.
    ///
    /// Guarantees progress: on return either the buffer gained items or
    /// `done` is set.
    fn refill(&mut self) -> Result<(), ClientError> {
        let request_size = match self.limit {
            Some(limit) => {
                let remaining = limit.saturating_sub(self.fetched);
                if remaining == 0 {
                    self.done = true;
                    return Ok(());
                }
                remaining.min(self.full_page_size())
            }
            None => self.full_page_size(),
        };

        let mut page_params = self.params.clone();
        match &self.cursor {
            Cursor::Paged { page, .. } => {
                page_params.insert("page".to_string(), Value::from(*page));
                page_params.insert("page_size".to_string(), Value::from(request_size));
            }
            Cursor::Offset { offset } => {
                page_params.insert("offset".to_string(), Value::from(*offset));
                page_params.insert("limit".to_string(), Value::from(request_size));
            }
        }

        let response = self.client.get(&self.path, Some(&page_params))?;
        let items = response
            .get(&self.result_key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        // An empty page ends iteration unconditionally, whatever the
        // pagination metadata claims. This is also the stop condition for
        // legacy servers that omit results_count entirely.
        if items.is_empty() {
            self.done = true;
            return Ok(());
        }

        let meta = PageMeta::from_response(&response);
        match &mut self.cursor {
            Cursor::Paged { page, .. } => {
                if meta.has_next_page {
                    *page += 1;
                } else {
                    self.done = true;
                }
            }
            Cursor::Offset { offset } => {
                // Advance by the count actually received, so a short page
                // still lines the next request up correctly.
                *offset += items.len() as u64;
                if let Some(total) = meta.results_count {
                    if *offset >= total {
                        self.done = true;
                    }
                }
            }
        }

        self.buffer.extend(items);
        Ok(())
    }
}

impl Iterator for ListIter<'_> {
    type Item = Result<Value, ClientError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(limit) = self.limit {
                if self.fetched >= limit {
                    return None;
                }
            }

            if let Some(item) = self.buffer.pop_front() {
                self.fetched += 1;
                return Some(Ok(item));
            }

            if self.done {
                return None;
            }

            if let Err(err) = self.refill() {
                self.done = true;
                return Some(Err(err));
            }
        }
    }
}
