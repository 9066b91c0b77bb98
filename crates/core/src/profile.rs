//! Backend variant profiles.
//!
//! Behavior varies across the three search backends by exactly two facts:
//! whether the backend reports per-item continuation cursors, and how deep
//! offset paging stays reliable. Both are carried here as explicit
//! configuration passed into the engine, never as global state or
//! subclassing. Each profile also names the monotonic tie-breaker field
//! bulk traversal orders by, plus an optional uniqueness field appended to
//! make that ordering total where the backend has one.

/// Per-variant facts the engine needs about a search backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendProfile {
    /// Variant name, used in logs
    pub name: &'static str,

    /// Whether the backend reports per-item continuation cursors
    pub cursor_capable: bool,

    /// Result-set size above which offset paging is disallowed, before
    /// deducting one page size
    pub bulk_threshold_base: u64,

    /// Monotonic (append-mostly) field bulk traversal orders by
    pub tie_breaker_field: &'static str,

    /// Uniqueness field appended to make the bulk ordering total, where the
    /// backend has one
    pub unique_sort_field: Option<&'static str>,
}

impl BackendProfile {
    /// Mass-extraction threshold for the given page size.
    ///
    /// Offset paging is reliable for approximate counts at or below this
    /// value; anything above must go through bulk traversal.
    pub const fn mass_threshold(&self, page_size: usize) -> u64 {
        self.bulk_threshold_base.saturating_sub(page_size as u64)
    }
}

/// Asset/index search: cursor-capable, deep offset budget
pub const ASSET_SEARCH: BackendProfile = BackendProfile {
    name: "asset-search",
    cursor_capable: true,
    bulk_threshold_base: 100_000,
    tie_breaker_field: "__timestamp",
    unique_sort_field: Some("__guid"),
};

/// Audit-log search: no cursor metadata, shallow offset budget
pub const AUDIT_SEARCH: BackendProfile = BackendProfile {
    name: "audit-search",
    cursor_capable: false,
    bulk_threshold_base: 10_000,
    tie_breaker_field: "created",
    unique_sort_field: Some("entityId"),
};

/// Search-activity-log search: no cursor metadata, shallow offset budget
pub const SEARCH_LOG: BackendProfile = BackendProfile {
    name: "search-log",
    cursor_capable: false,
    bulk_threshold_base: 10_000,
    tie_breaker_field: "timestamp",
    unique_sort_field: None,
};
