//! The traversal facade and its threshold policy.
//!
//! A [`SearchScroll`] is built around the first fetched page and chooses
//! the iteration strategy from the reported approximate count:
//! - at or below the profile's mass-extraction threshold, offset paging is
//!   reliable and `stream()` pages sequentially (or `parallel_stream()`
//!   fans sub-ranges out to a worker pool);
//! - above it, both transparently delegate to bulk traversal, which
//!   rewrites a default sort to the cursor-safe order and refuses explicit
//!   caller orderings.
//!
//! A scroll is single-use: every strategy consumes it, and re-traversal
//! means re-issuing the original search.

use crate::bulk::BulkPager;
use crate::offset::OffsetPager;
use crate::parallel::ParallelStream;
use crate::splitter::PageSplitter;
use searchstream_core::{
    BackendProfile, PageFetcher, PageRequest, PageResult, Record, Result,
};
use tracing::debug;

// ============================================================================
// SearchScroll
// ============================================================================

/// One issued search, ready to be traversed exactly once
pub struct SearchScroll<R, F> {
    fetcher: F,
    request: PageRequest,
    profile: BackendProfile,
    first: PageResult<R>,
}

impl<R: Record, F: PageFetcher<R> + Clone> SearchScroll<R, F> {
    /// Issue the search and capture its first page.
    pub fn open(fetcher: F, request: PageRequest, profile: BackendProfile) -> Result<Self> {
        let first = fetcher.fetch(&request.for_offset(0))?;
        Ok(SearchScroll {
            fetcher,
            request,
            profile,
            first,
        })
    }

    /// Wrap a first page the transport already fetched at offset zero.
    pub fn from_first_page(
        fetcher: F,
        request: PageRequest,
        profile: BackendProfile,
        first: PageResult<R>,
    ) -> Self {
        SearchScroll {
            fetcher,
            request,
            profile,
            first,
        }
    }

    /// Best-effort size of the whole result set
    pub fn approximate_count(&self) -> u64 {
        self.first.approximate_count
    }

    /// Exact size, when the backend reported one
    pub fn total_count(&self) -> Option<u64> {
        self.first.total_count
    }

    /// The page captured when the search was issued
    pub fn first_page(&self) -> &PageResult<R> {
        &self.first
    }

    /// The backend profile this scroll was opened against
    pub fn profile(&self) -> &BackendProfile {
        &self.profile
    }

    fn over_threshold(&self) -> bool {
        let threshold = self.profile.mass_threshold(self.request.page_size);
        self.first.approximate_count > threshold
    }

    /// Sequential lazy traversal.
    ///
    /// Below or at the threshold this preserves the caller's requested
    /// sort. Above it, bulk traversal takes over: a purely-default sort is
    /// silently rewritten, an explicit one is rejected with
    /// [`UnsafeBulkSort`](searchstream_core::Error::UnsafeBulkSort).
    pub fn stream(self) -> Result<ResultStream<R, F>> {
        if self.over_threshold() {
            debug!(
                approximate = self.first.approximate_count,
                profile = self.profile.name,
                "result set beyond offset budget; delegating to bulk traversal"
            );
            return self.bulk_stream();
        }

        let pager = OffsetPager::new(self.fetcher, self.request.for_offset(0), self.first);
        Ok(ResultStream::Offset(pager))
    }

    /// Bulk traversal regardless of result-set size.
    ///
    /// Always applies the bulk sort rules; see [`BulkPager::new`].
    pub fn bulk_stream(self) -> Result<ResultStream<R, F>> {
        let pager = BulkPager::new(self.fetcher, self.request, self.profile, Some(self.first))?;
        Ok(ResultStream::Bulk(pager))
    }
}

impl<R, F> SearchScroll<R, F>
where
    R: Record + Send + 'static,
    F: PageFetcher<R> + Clone + Send + 'static,
{
    /// Concurrent traversal over page-aligned sub-ranges.
    ///
    /// Above the threshold true parallel fetching is unsafe, so this falls
    /// back to (sequential) bulk traversal with the same sort rules as
    /// [`stream`](Self::stream).
    pub fn parallel_stream(self, workers: usize) -> Result<ResultStream<R, F>> {
        if self.over_threshold() {
            debug!(
                approximate = self.first.approximate_count,
                profile = self.profile.name,
                "result set beyond offset budget; parallel falls back to bulk"
            );
            return self.bulk_stream();
        }

        let end = self.first.total_count.unwrap_or(self.first.approximate_count);
        let splitter = PageSplitter::new(
            self.fetcher,
            self.request.for_offset(0),
            Some(self.first.items),
            end,
        );
        Ok(ResultStream::Parallel(ParallelStream::spawn(splitter, workers)))
    }
}

impl<R, F> std::fmt::Debug for SearchScroll<R, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchScroll")
            .field("profile", &self.profile.name)
            .field("approximate_count", &self.first.approximate_count)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// ResultStream
// ============================================================================

/// A lazy sequence of typed results, whatever strategy produces it.
///
/// Plain pull-based [`Iterator`]: each pull yields the next record or the
/// failure that terminated the traversal. Finite, not restartable.
pub enum ResultStream<R, F> {
    /// Sequential offset paging
    Offset(OffsetPager<R, F>),
    /// Cursor or range-window bulk paging
    Bulk(BulkPager<R, F>),
    /// Worker-pool traversal of split offset ranges
    Parallel(ParallelStream<R>),
}

impl<R: Record, F: PageFetcher<R>> Iterator for ResultStream<R, F> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Result<R>> {
        match self {
            ResultStream::Offset(pager) => pager.next(),
            ResultStream::Bulk(pager) => pager.next(),
            ResultStream::Parallel(stream) => stream.next(),
        }
    }
}

impl<R, F> std::fmt::Debug for ResultStream<R, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let strategy = match self {
            ResultStream::Offset(_) => "offset",
            ResultStream::Bulk(_) => "bulk",
            ResultStream::Parallel(_) => "parallel",
        };
        f.debug_tuple("ResultStream").field(&strategy).finish()
    }
}
