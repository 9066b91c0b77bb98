//! Sequential offset-based pager.
//!
//! Buffers one page and fetches the next at `from + page_size` only when
//! the consumer pulls past the buffer. A page shorter than `page_size`
//! (or empty) signals exhaustion; no further fetch is attempted. Offset
//! paging is only reliable up to the profile's mass-extraction threshold —
//! the facade never routes deeper traversals here.

use searchstream_core::{PageFetcher, PageRequest, PageResult, Result};
use tracing::debug;

/// Lazy sequential pager over a numeric offset origin.
///
/// Yields `Result` items: a fetch failure is surfaced as one `Err` item
/// and the traversal then terminates.
pub struct OffsetPager<R, F> {
    fetcher: F,
    request: PageRequest,
    buffer: std::vec::IntoIter<R>,
    next_from: u64,
    done: bool,
}

impl<R, F: PageFetcher<R>> OffsetPager<R, F> {
    /// Start a traversal from an already-fetched first page.
    ///
    /// `request` is the base request the first page was fetched with; the
    /// first page is assumed to start at its offset origin (0 when unset).
    pub fn new(fetcher: F, request: PageRequest, first: PageResult<R>) -> Self {
        let start = request.from.unwrap_or(0);
        let done = first.len() < request.page_size;
        let next_from = start + first.len() as u64;

        OffsetPager {
            fetcher,
            request,
            buffer: first.items.into_iter(),
            next_from,
            done,
        }
    }

    fn fetch_next(&mut self) -> Result<PageResult<R>> {
        let request = self.request.for_offset(self.next_from);
        debug!(from = self.next_from, page_size = request.page_size, "offset fetch");
        self.fetcher.fetch(&request)
    }
}

impl<R, F: PageFetcher<R>> Iterator for OffsetPager<R, F> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Result<R>> {
        loop {
            if let Some(item) = self.buffer.next() {
                return Some(Ok(item));
            }
            if self.done {
                return None;
            }

            match self.fetch_next() {
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
                Ok(page) => {
                    if page.len() < self.request.page_size {
                        self.done = true;
                    }
                    if page.is_empty() {
                        return None;
                    }
                    self.next_from += page.len() as u64;
                    self.buffer = page.items.into_iter();
                }
            }
        }
    }
}

impl<R, F> std::fmt::Debug for OffsetPager<R, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OffsetPager")
            .field("next_from", &self.next_from)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
