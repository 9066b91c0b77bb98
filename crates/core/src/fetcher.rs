//! The external collaborator: one network round-trip per page.
//!
//! Everything endpoint-specific — URL assembly, auth, DTO wrapping — lives
//! behind this trait. The engine only ever submits a [`PageRequest`] and
//! receives a [`PageResult`] or a failure. Failures are surfaced, never
//! retried, here; retry policy belongs to the transport underneath.

use crate::error::Result;
use crate::page::PageResult;
use crate::request::PageRequest;

/// Submit a search request, receive one page of typed results.
///
/// Implementations must be safe to invoke concurrently from independent
/// calls — parallel traversal issues fetches from several worker threads
/// against one shared fetcher.
pub trait PageFetcher<R>: Send + Sync {
    /// Perform one blocking page fetch
    fn fetch(&self, request: &PageRequest) -> Result<PageResult<R>>;
}

impl<R, F: PageFetcher<R> + ?Sized> PageFetcher<R> for std::sync::Arc<F> {
    fn fetch(&self, request: &PageRequest) -> Result<PageResult<R>> {
        (**self).fetch(request)
    }
}

impl<'a, R, F: PageFetcher<R> + ?Sized> PageFetcher<R> for &'a F {
    fn fetch(&self, request: &PageRequest) -> Result<PageResult<R>> {
        (**self).fetch(request)
    }
}
