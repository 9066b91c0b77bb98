//! The searchstream result-iteration engine.
//!
//! This crate provides:
//! - sort classification and rewriting for bulk traversal ([`sort_policy`])
//! - [`OffsetPager`]: sequential lazy offset paging
//! - [`BulkPager`]: cursor / range-window bulk paging with a bounded
//!   boundary deduplication window
//! - [`PageSplitter`] + [`ParallelStream`]: page-aligned range splitting
//!   drained by a fixed worker pool
//! - [`SearchScroll`]: the facade that picks a strategy from the reported
//!   result-set size and the backend profile's mass-extraction threshold
//!
//! Contract types (requests, pages, profiles, errors) live in
//! `searchstream-core`; transports implement
//! [`PageFetcher`](searchstream_core::PageFetcher) and never appear here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bulk;
pub mod offset;
pub mod parallel;
pub mod scroll;
pub mod sort_policy;
pub mod splitter;

#[cfg(test)]
pub(crate) mod testkit;

pub use bulk::BulkPager;
pub use offset::OffsetPager;
pub use parallel::ParallelStream;
pub use scroll::{ResultStream, SearchScroll};
pub use splitter::{PageSplitter, SplitDrain};
