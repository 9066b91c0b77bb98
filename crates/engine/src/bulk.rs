//! Sequential bulk pager for result sets past the offset-paging budget.
//!
//! Two sub-strategies, chosen by the backend profile:
//! - **cursor paging**: the backend reports per-item continuation tokens,
//!   so each follow-up request resumes after the last consumed item
//!   (search-after). The backend guarantees forward progress per exact
//!   token; no deduplication is needed.
//! - **range-window fallback**: no cursor metadata. Each follow-up request
//!   is a fresh query bounded by `tie_breaker >= last seen value`, offset
//!   reset to zero. Consecutive windows can overlap where several records
//!   share one tie-breaker value, so the pager remembers the identities
//!   already emitted *at the current boundary value* and skips repeats,
//!   clearing that set the moment the boundary advances. Memory is bounded
//!   by "records sharing one timestamp", never the whole traversal.
//!
//! Both strategies require the results to arrive ascending by the
//! tie-breaker; construction enforces that via the sort policy and refuses
//! explicit caller orderings outright.

use crate::sort_policy;
use searchstream_core::{
    BackendProfile, Error, PageFetcher, PageRequest, PageResult, Record, RecordId, Result,
};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, warn};

/// Lazy sequential pager over cursor or range-window continuation.
///
/// Inherently non-parallelizable: each window's query depends on the
/// previous window's last observed tie-breaker value.
pub struct BulkPager<R, F> {
    fetcher: F,
    base: PageRequest,
    profile: BackendProfile,
    buffer: VecDeque<R>,
    pending: Option<PageRequest>,
    done: bool,
    // Range-window continuation state
    window_bound: Option<i64>,
    window_from: u64,
    last_boundary: Option<i64>,
    seen_at_boundary: HashSet<RecordId>,
}

impl<R: Record, F: PageFetcher<R>> BulkPager<R, F> {
    /// Build a bulk traversal over `request`.
    ///
    /// Sort handling:
    /// - already cursor-safe: proceed, reusing `first` if supplied;
    /// - explicit caller ordering: fail with [`Error::UnsafeBulkSort`]
    ///   before any network call;
    /// - default ordering only: silently substitute the cursor-safe sort
    ///   and refetch the first page lazily (`first`, fetched under the old
    ///   sort, is discarded).
    pub fn new(
        fetcher: F,
        request: PageRequest,
        profile: BackendProfile,
        first: Option<PageResult<R>>,
    ) -> Result<Self> {
        let (base, reusable_first) = if sort_policy::is_cursor_safe(&request.sort, &profile) {
            (request, first)
        } else if sort_policy::has_explicit_user_sort(&request.sort, &profile) {
            let field = sort_policy::first_explicit_field(&request.sort, &profile)
                .unwrap_or_default()
                .to_string();
            return Err(Error::UnsafeBulkSort { field });
        } else {
            warn!(
                profile = profile.name,
                "rewriting default sort to cursor-safe order for bulk traversal"
            );
            let mut request = request;
            request.sort = sort_policy::force_cursor_safe(std::mem::take(&mut request.sort), &profile);
            (request, None)
        };

        let mut base = base;
        base.from = None;
        base.cursor = None;

        let pending = Some(base.for_offset(0));
        let mut pager = BulkPager {
            fetcher,
            base,
            profile,
            buffer: VecDeque::new(),
            pending,
            done: false,
            window_bound: None,
            window_from: 0,
            last_boundary: None,
            seen_at_boundary: HashSet::new(),
        };

        if let Some(page) = reusable_first {
            pager.pending = None;
            pager.ingest(page)?;
        }

        Ok(pager)
    }

    fn ingest(&mut self, page: PageResult<R>) -> Result<()> {
        if page.is_empty() {
            self.done = true;
            self.pending = None;
            return Ok(());
        }

        if self.profile.cursor_capable {
            self.ingest_cursored(page)
        } else {
            self.ingest_windowed(page)
        }
    }

    fn ingest_cursored(&mut self, page: PageResult<R>) -> Result<()> {
        let short = page.len() < self.base.page_size;
        match page.items.last() {
            Some(last) if !short => {
                let id = last.id();
                let token = page.cursor_for(&id).cloned().ok_or_else(|| {
                    Error::invalid_cursor(format!(
                        "backend reported no continuation token for record {id}"
                    ))
                })?;
                if token.is_empty() {
                    return Err(Error::invalid_cursor(format!(
                        "empty continuation token for record {id}"
                    )));
                }
                self.pending = Some(self.base.for_cursor(token));
            }
            _ => {
                self.done = true;
                self.pending = None;
            }
        }

        self.buffer.extend(page.items);
        Ok(())
    }

    fn ingest_windowed(&mut self, page: PageResult<R>) -> Result<()> {
        let full = page.len() == self.base.page_size;
        let field = self.profile.tie_breaker_field;
        let mut last_value: Option<i64> = None;

        for item in page.items {
            let id = item.id();
            let value = item.tie_breaker(field).ok_or_else(|| {
                Error::invalid_cursor(format!("record {id} lacks tie-breaker field '{field}'"))
            })?;
            last_value = Some(value);

            if self.last_boundary == Some(value) {
                if !self.seen_at_boundary.insert(id) {
                    continue;
                }
            } else {
                self.last_boundary = Some(value);
                self.seen_at_boundary.clear();
                self.seen_at_boundary.insert(id);
            }
            self.buffer.push_back(item);
        }

        if !full {
            self.done = true;
            self.pending = None;
            return Ok(());
        }

        let Some(bound) = last_value else {
            // Non-empty page always records a value; treated as exhaustion
            self.done = true;
            self.pending = None;
            return Ok(());
        };

        if self.window_bound == Some(bound) {
            // The whole page sat at one frozen boundary. Re-issuing the same
            // window query would loop, so keep the window and advance the
            // offset within it instead; dedup covers the overlap.
            self.window_from += self.base.page_size as u64;
        } else {
            self.window_bound = Some(bound);
            self.window_from = 0;
        }

        let mut next = self.base.for_window(field, bound);
        if self.window_from > 0 {
            next = next.for_offset(self.window_from);
        }
        debug!(
            bound,
            from = self.window_from,
            profile = self.profile.name,
            "windowed continuation"
        );
        self.pending = Some(next);
        Ok(())
    }
}

impl<R: Record, F: PageFetcher<R>> Iterator for BulkPager<R, F> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Result<R>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.done {
                return None;
            }

            let Some(request) = self.pending.take() else {
                self.done = true;
                return None;
            };

            match self.fetcher.fetch(&request) {
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
                Ok(page) => {
                    if let Err(err) = self.ingest(page) {
                        self.done = true;
                        return Some(Err(err));
                    }
                }
            }
        }
    }
}

impl<R, F> std::fmt::Debug for BulkPager<R, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkPager")
            .field("profile", &self.profile.name)
            .field("window_bound", &self.window_bound)
            .field("window_from", &self.window_from)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
