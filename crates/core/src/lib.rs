//! Contract types for the searchstream result-iteration engine.
//!
//! This crate defines the data model shared between the engine and the
//! transport implementations:
//! - [`PageRequest`] / [`PageResult`]: one search call and its page of results
//! - [`Query`]: the minimal filter tree (opaque leaf + range conjunction)
//! - [`SortSpec`] / [`SortDirection`]: sort criteria
//! - [`CursorToken`]: opaque search-after continuation tokens
//! - [`Record`] / [`RecordId`]: the two facts the engine needs about results
//! - [`BackendProfile`]: per-variant configuration (cursor capability,
//!   mass-extraction threshold, tie-breaker field)
//! - [`PageFetcher`]: the external collaborator performing page fetches
//! - [`Error`] / [`Result`]: the engine's error taxonomy
//!
//! The iteration strategies themselves live in `searchstream-engine`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
pub mod error;
pub mod fetcher;
pub mod page;
pub mod profile;
pub mod query;
pub mod record;
pub mod request;
pub mod sort;

pub use cursor::CursorToken;
pub use error::{Error, Result};
pub use fetcher::PageFetcher;
pub use page::PageResult;
pub use profile::{BackendProfile, ASSET_SEARCH, AUDIT_SEARCH, SEARCH_LOG};
pub use query::Query;
pub use record::{Record, RecordId};
pub use request::PageRequest;
pub use sort::{SortDirection, SortSpec};
