//! Page request: an immutable description of one search call.
//!
//! A request carries the caller's filter and sort, the paging origin
//! (numeric offset or continuation cursor), the page size, and the set of
//! fields to project. The engine derives every follow-up request from the
//! original via [`PageRequest::for_offset`] and [`PageRequest::for_cursor`],
//! which keep the two paging origins mutually exclusive.

use crate::cursor::CursorToken;
use crate::error::{Error, Result};
use crate::query::Query;
use crate::sort::SortSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One search call: filter, sort, paging origin, page size, projection
///
/// # Invariant
///
/// At most one of `from` / `cursor` is populated. Requests built through
/// the constructors and `for_*` derivations uphold this; the engine never
/// mutates a request in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Caller's filter, opaque to the engine
    pub query: Query,

    /// Ordered sort criteria
    pub sort: Vec<SortSpec>,

    /// Offset paging origin (numeric skip)
    pub from: Option<u64>,

    /// Cursor paging origin (search-after token)
    pub cursor: Option<CursorToken>,

    /// Items per page, always > 0
    pub page_size: usize,

    /// Field names to project into results
    pub attributes: BTreeSet<String>,
}

impl PageRequest {
    /// Create a request with no sort, no paging origin, and no projection.
    ///
    /// Returns [`Error::InvalidPageSize`] for a zero page size; every other
    /// field starts empty and is filled via the `with_*` builders.
    pub fn new(query: Query, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize { given: page_size });
        }

        Ok(PageRequest {
            query,
            sort: vec![],
            from: None,
            cursor: None,
            page_size,
            attributes: BTreeSet::new(),
        })
    }

    /// Builder: set the sort criteria
    pub fn with_sort(mut self, sort: Vec<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    /// Builder: add one field to the projection
    pub fn with_attribute(mut self, field: impl Into<String>) -> Self {
        self.attributes.insert(field.into());
        self
    }

    /// Builder: replace the projection set
    pub fn with_attributes(mut self, fields: impl IntoIterator<Item = String>) -> Self {
        self.attributes = fields.into_iter().collect();
        self
    }

    /// Derive the request for an offset-paged fetch starting at `from`.
    ///
    /// Clears any cursor origin.
    pub fn for_offset(&self, from: u64) -> Self {
        let mut req = self.clone();
        req.from = Some(from);
        req.cursor = None;
        req
    }

    /// Derive the request for a cursor-paged fetch resuming after `token`.
    ///
    /// Clears any offset origin.
    pub fn for_cursor(&self, token: CursorToken) -> Self {
        let mut req = self.clone();
        req.cursor = Some(token);
        req.from = None;
        req
    }

    /// Derive a fresh windowed request: same projection and page size, the
    /// filter re-anchored at `tie_breaker >= bound`, offset reset to zero.
    pub fn for_window(&self, field: &str, bound: i64) -> Self {
        let mut req = self.clone();
        req.query = req.query.with_range_gte(field, bound);
        req.from = Some(0);
        req.cursor = None;
        req
    }
}
