//! Page-aligned divide-and-conquer splitting of an offset range.
//!
//! A splitter models a known-size offset range `[start, end)` over one
//! immutable query. Splitting hands off page-aligned sub-ranges that never
//! straddle a fetch boundary, so every sub-range can be drained by
//! independent offset fetches with no coordination. Only valid below the
//! mass-extraction threshold, where offset paging stays reliable — the
//! facade enforces that.

use searchstream_core::{PageFetcher, PageRequest, Result};
use tracing::debug;

/// One splittable sub-range of an offset traversal
pub struct PageSplitter<R, F> {
    fetcher: F,
    request: PageRequest,
    start: u64,
    end: u64,
    /// First page handed over by the facade, covering `[start, start+len)`
    first: Option<Vec<R>>,
}

impl<R, F: PageFetcher<R> + Clone> PageSplitter<R, F> {
    /// A splitter over `[0, end)`, optionally seeded with the already
    /// fetched first page so it is never refetched.
    pub fn new(fetcher: F, request: PageRequest, first: Option<Vec<R>>, end: u64) -> Self {
        PageSplitter {
            fetcher,
            request,
            start: 0,
            end,
            first,
        }
    }

    /// Offsets not yet covered by a handed-off split or a drained page
    pub fn remaining(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Try to hand off a sub-range for independent consumption.
    ///
    /// Ranges of one page or less refuse to split, buffered page
    /// included. Above that, the buffered first page, if still held,
    /// becomes its own split so the fetch that produced it is never
    /// repeated; otherwise the range splits at the midpoint rounded down
    /// to a page-size multiple.
    pub fn try_split(&mut self) -> Option<Self> {
        let page_size = self.request.page_size as u64;
        if self.remaining() <= page_size {
            return None;
        }

        if let Some(items) = self.first.take() {
            let len = items.len() as u64;
            let split = PageSplitter {
                fetcher: self.fetcher.clone(),
                request: self.request.clone(),
                start: self.start,
                end: (self.start + len).min(self.end),
                first: Some(items),
            };
            self.start = (self.start + len).min(self.end);
            return Some(split);
        }

        // Page-aligned midpoint; at least one whole page stays on each side
        let remaining = self.remaining();
        let half_pages = ((remaining / 2) / page_size).max(1);
        let mid = self.start + half_pages * page_size;

        let split = PageSplitter {
            fetcher: self.fetcher.clone(),
            request: self.request.clone(),
            start: self.start,
            end: mid,
            first: None,
        };
        self.start = mid;
        debug!(
            split_start = split.start,
            split_end = split.end,
            rest_start = self.start,
            rest_end = self.end,
            "range split"
        );
        Some(split)
    }

    /// Split recursively until no sub-range can split further.
    pub fn split_fully(self) -> Vec<Self> {
        let mut work = vec![self];
        let mut leaves = Vec::new();

        while let Some(mut splitter) = work.pop() {
            match splitter.try_split() {
                Some(left) => {
                    work.push(splitter);
                    work.push(left);
                }
                None => leaves.push(splitter),
            }
        }
        leaves
    }

    /// Drain this sub-range sequentially.
    pub fn drain(self) -> SplitDrain<R, F> {
        let span = self.end.saturating_sub(self.start) as usize;
        SplitDrain {
            fetcher: self.fetcher,
            request: self.request,
            position: self.start,
            end: self.end,
            // A buffered page can outrun a range capped below one page
            buffer: self.first.map(|mut items| {
                items.truncate(span);
                items.into_iter()
            }),
            done: false,
        }
    }
}

/// Sequential consumer of one sub-range, fetching offset-scoped pages
pub struct SplitDrain<R, F> {
    fetcher: F,
    request: PageRequest,
    position: u64,
    end: u64,
    buffer: Option<std::vec::IntoIter<R>>,
    done: bool,
}

impl<R, F: PageFetcher<R>> Iterator for SplitDrain<R, F> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Result<R>> {
        loop {
            if let Some(buffer) = self.buffer.as_mut() {
                if let Some(item) = buffer.next() {
                    self.position += 1;
                    return Some(Ok(item));
                }
                self.buffer = None;
            }
            if self.done || self.position >= self.end {
                return None;
            }

            let request = self.request.for_offset(self.position);
            match self.fetcher.fetch(&request) {
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
                Ok(page) => {
                    if page.len() < request.page_size {
                        // Short page: the backend ran out inside this range
                        self.done = true;
                    }
                    if page.is_empty() {
                        return None;
                    }
                    let take = (self.end - self.position).min(page.len() as u64) as usize;
                    let mut items = page.items;
                    items.truncate(take);
                    self.buffer = Some(items.into_iter());
                }
            }
        }
    }
}
