//! searchstream - streaming result iteration for paginated remote search APIs
//!
//! A remote search backend hands out results one page at a time, caps how
//! deep offset paging may go, and keeps being written to while you read.
//! This crate turns that into a lazy sequence of typed results: it pages on
//! demand, switches to cursor or range-window bulk traversal when the
//! result set outgrows the offset budget, deduplicates records that
//! straddle a window boundary, and can fan page-aligned sub-ranges out to
//! a worker pool.
//!
//! # Quick Start
//!
//! ```ignore
//! use searchstream::{PageRequest, Query, SearchScroll, AUDIT_SEARCH};
//!
//! // `transport` is your PageFetcher implementation
//! let request = PageRequest::new(Query::raw(filter_dsl), 300)?;
//! let scroll = SearchScroll::open(transport, request, AUDIT_SEARCH)?;
//!
//! for entry in scroll.stream()? {
//!     let entry = entry?;
//!     // ...
//! }
//! ```
//!
//! # Architecture
//!
//! Contract types (requests, pages, backend profiles, the [`PageFetcher`]
//! trait) live in `searchstream-core`; the pagers, splitter, worker pool,
//! and the [`SearchScroll`] facade live in `searchstream-engine`. Transports
//! and endpoint DTOs are not part of this crate — implement [`PageFetcher`]
//! to plug a backend in.

// Re-export the public API from the member crates
pub use searchstream_core::*;
pub use searchstream_engine::*;
