//! In-memory backend used by the engine's unit tests.
//!
//! `MockBackend` serves pages from a fixed row set the way the remote
//! query engine would: it evaluates the engine's range conjunctions,
//! applies the request's sort, slices by offset or resumes after a cursor
//! token, and logs every request it sees so tests can assert on the exact
//! fetch pattern (including "no fetch happened at all").

use parking_lot::Mutex;
use searchstream_core::{
    CursorToken, Error, PageFetcher, PageRequest, PageResult, Query, Record, RecordId, Result,
    SortDirection, SortSpec,
};
use std::cmp::Ordering;
use std::collections::HashMap;

// ============================================================================
// TestRow
// ============================================================================

/// Minimal record: a guid plus one monotonic timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRow {
    pub guid: String,
    pub created: i64,
}

impl Record for TestRow {
    fn id(&self) -> RecordId {
        RecordId::new(&self.guid)
    }

    fn tie_breaker(&self, field: &str) -> Option<i64> {
        is_time_field(field).then_some(self.created)
    }
}

/// `n` rows with distinct ascending timestamps
pub fn rows(n: usize) -> Vec<TestRow> {
    (0..n)
        .map(|i| TestRow {
            guid: format!("g-{i:05}"),
            created: 1_000 + i as i64,
        })
        .collect()
}

/// Rows with caller-chosen timestamps (for boundary-collision scenarios)
pub fn rows_with_times(times: &[i64]) -> Vec<TestRow> {
    times
        .iter()
        .enumerate()
        .map(|(i, &t)| TestRow {
            guid: format!("g-{i:05}"),
            created: t,
        })
        .collect()
}

// The three backend variants name their tie-breaker differently; the mock
// maps all of them onto `created`.
fn is_time_field(field: &str) -> bool {
    matches!(field, "created" | "timestamp" | "__timestamp")
}

fn is_guid_field(field: &str) -> bool {
    matches!(field, "guid" | "entityId" | "__guid")
}

// ============================================================================
// MockBackend
// ============================================================================

/// Fixed-dataset page server with request logging and fault injection
pub struct MockBackend {
    dataset: Vec<TestRow>,
    cursored: bool,
    approximate_override: Option<u64>,
    fail_on: Option<usize>,
    requests: Mutex<Vec<PageRequest>>,
    page_sizes: Mutex<Vec<usize>>,
}

impl MockBackend {
    pub fn new(dataset: Vec<TestRow>) -> Self {
        MockBackend {
            dataset,
            cursored: false,
            approximate_override: None,
            fail_on: None,
            requests: Mutex::new(vec![]),
            page_sizes: Mutex::new(vec![]),
        }
    }

    /// Builder: report per-item continuation tokens (cursor-capable variant)
    pub fn with_cursors(mut self) -> Self {
        self.cursored = true;
        self
    }

    /// Builder: report this approximate count instead of the true size
    pub fn with_approximate(mut self, approximate: u64) -> Self {
        self.approximate_override = Some(approximate);
        self
    }

    /// Builder: fail the `n`-th fetch (0-based) with a transport error
    pub fn fail_on_fetch(mut self, n: usize) -> Self {
        self.fail_on = Some(n);
        self
    }

    /// A base request over the whole dataset
    pub fn request(&self, page_size: usize) -> PageRequest {
        PageRequest::new(Query::All, page_size).expect("non-zero page size")
    }

    pub fn fetch_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Sizes of the pages returned so far, in fetch order
    pub fn fetch_sizes(&self) -> Vec<usize> {
        self.page_sizes.lock().clone()
    }

    /// Every request seen so far, in fetch order
    pub fn logged_requests(&self) -> Vec<PageRequest> {
        self.requests.lock().clone()
    }

    fn matches(row: &TestRow, query: &Query) -> bool {
        match query {
            Query::All | Query::Raw(_) => true,
            Query::And(parts) => parts.iter().all(|p| Self::matches(row, p)),
            Query::RangeGte { field, value } => {
                !is_time_field(field) || row.created >= *value
            }
        }
    }

    fn sorted_selection(&self, request: &PageRequest) -> Vec<TestRow> {
        let mut selected: Vec<TestRow> = self
            .dataset
            .iter()
            .filter(|row| Self::matches(row, &request.query))
            .cloned()
            .collect();

        // Dataset order (created, guid) when no sort was requested
        selected.sort_by(|a, b| {
            for spec in &request.sort {
                let ord = compare_by(a, b, spec);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (a.created, &a.guid).cmp(&(b.created, &b.guid))
        });
        selected
    }

    fn resume_index(selection: &[TestRow], token: &CursorToken) -> Result<usize> {
        let values = token.values();
        let (created, guid) = match (values.first(), values.get(1)) {
            (Some(c), Some(g)) => (
                c.as_i64()
                    .ok_or_else(|| Error::invalid_cursor("non-numeric sort value"))?,
                g.as_str()
                    .ok_or_else(|| Error::invalid_cursor("non-string guid value"))?,
            ),
            _ => return Err(Error::invalid_cursor("token arity")),
        };

        Ok(selection
            .iter()
            .position(|row| (row.created, row.guid.as_str()) > (created, guid))
            .unwrap_or(selection.len()))
    }
}

fn compare_by(a: &TestRow, b: &TestRow, spec: &SortSpec) -> Ordering {
    let ord = if is_time_field(&spec.field) {
        a.created.cmp(&b.created)
    } else if is_guid_field(&spec.field) {
        a.guid.cmp(&b.guid)
    } else {
        Ordering::Equal
    };

    match spec.direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

impl PageFetcher<TestRow> for MockBackend {
    fn fetch(&self, request: &PageRequest) -> Result<PageResult<TestRow>> {
        let fetch_index = {
            let mut log = self.requests.lock();
            log.push(request.clone());
            log.len() - 1
        };

        if self.fail_on == Some(fetch_index) {
            return Err(Error::fetch("injected transport failure"));
        }

        let selection = self.sorted_selection(request);
        let start = match &request.cursor {
            Some(token) => Self::resume_index(&selection, token)?,
            None => request.from.unwrap_or(0) as usize,
        };

        let end = (start + request.page_size).min(selection.len());
        let items: Vec<TestRow> = selection
            .get(start..end)
            .map(<[TestRow]>::to_vec)
            .unwrap_or_default();
        self.page_sizes.lock().push(items.len());

        let approximate = self
            .approximate_override
            .unwrap_or(selection.len() as u64);
        let mut page = PageResult::new(items, approximate).with_total(selection.len() as u64);

        if self.cursored {
            let cursors: HashMap<RecordId, CursorToken> = page
                .items
                .iter()
                .map(|row| {
                    (
                        row.id(),
                        CursorToken::new(vec![row.created.into(), row.guid.clone().into()]),
                    )
                })
                .collect();
            page = page.with_cursors(cursors);
        }

        Ok(page)
    }
}
