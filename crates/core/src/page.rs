//! One fetched page of typed results plus its paging metadata.

use crate::cursor::CursorToken;
use crate::record::RecordId;
use std::collections::HashMap;

/// Items returned for one page request, with count metadata
///
/// # Invariant
///
/// `cursors` is populated only by cursor-capable backend variants; the
/// audit-log and search-activity-log backends never report per-item
/// continuation tokens.
#[derive(Debug, Clone)]
pub struct PageResult<R> {
    /// Ordered page items, at most `page_size` of them
    pub items: Vec<R>,

    /// Best-effort total for the whole result set; may be capped by the
    /// backend
    pub approximate_count: u64,

    /// Exact total, only cheaply available for small result sets
    pub total_count: Option<u64>,

    /// Per-item continuation tokens, keyed by record identity
    pub cursors: Option<HashMap<RecordId, CursorToken>>,
}

impl<R> PageResult<R> {
    /// A page with items and an approximate count, no exact count and no
    /// cursor metadata
    pub fn new(items: Vec<R>, approximate_count: u64) -> Self {
        PageResult {
            items,
            approximate_count,
            total_count: None,
            cursors: None,
        }
    }

    /// Builder: attach the exact total
    pub fn with_total(mut self, total: u64) -> Self {
        self.total_count = Some(total);
        self
    }

    /// Builder: attach per-item continuation tokens
    pub fn with_cursors(mut self, cursors: HashMap<RecordId, CursorToken>) -> Self {
        self.cursors = Some(cursors);
        self
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when this page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Continuation token reported for the given record, if any
    pub fn cursor_for(&self, id: &RecordId) -> Option<&CursorToken> {
        self.cursors.as_ref()?.get(id)
    }
}
