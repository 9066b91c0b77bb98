//! End-to-end traversal behavior across all three strategies.

#[path = "../common/mod.rs"]
mod common;

use common::{events, events_at, ids_of, SearchService};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use searchstream::{Error, PageFetcher, SearchScroll, SortSpec, AUDIT_SEARCH, SEARCH_LOG};
use std::collections::HashSet;
use std::sync::Arc;

fn open(
    service: &Arc<SearchService>,
    page_size: usize,
) -> SearchScroll<common::LogEvent, Arc<SearchService>> {
    let request = service.request(page_size);
    SearchScroll::open(Arc::clone(service), request, AUDIT_SEARCH).unwrap()
}

// ============================================================================
// Sequential traversal
// ============================================================================

#[test]
fn five_items_page_size_two_fetches_three_pages() {
    let service = Arc::new(SearchService::new(events(5)));
    let items: Vec<_> = open(&service, 2)
        .stream()
        .unwrap()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(items.len(), 5);
    // Initial page + two follow-ups; the short final page ends the scan
    assert_eq!(service.fetch_count(), 3);

    let froms: Vec<_> = service
        .logged_requests()
        .iter()
        .map(|r| r.from.unwrap())
        .collect();
    assert_eq!(froms, vec![0, 2, 4]);
}

#[test]
fn sequential_traversal_equals_single_big_page() {
    let dataset = events(123);
    let service = Arc::new(SearchService::new(dataset.clone()));

    let paged: Vec<_> = open(&service, 10)
        .stream()
        .unwrap()
        .map(|r| r.unwrap())
        .collect();

    let one_shot = service
        .fetch(&service.request(123).for_offset(0))
        .unwrap();

    assert_eq!(ids_of(&paged), ids_of(&one_shot.items));
}

#[test]
fn explicit_sort_preserved_below_threshold() {
    let service = Arc::new(SearchService::new(events(9)));
    let request = service
        .request(4)
        .with_sort(vec![SortSpec::descending("created")]);
    let scroll = SearchScroll::open(Arc::clone(&service), request, AUDIT_SEARCH).unwrap();

    let items: Vec<_> = scroll.stream().unwrap().map(|r| r.unwrap()).collect();
    let times: Vec<i64> = items.iter().map(|e| e.created).collect();
    let mut sorted = times.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(times, sorted, "descending order preserved");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_paged_concatenation_matches_one_shot(
        total in 0usize..200,
        page_size in 1usize..40,
    ) {
        let service = Arc::new(SearchService::new(events(total)));
        let paged: Vec<_> = open(&service, page_size)
            .stream()
            .unwrap()
            .map(|r| r.unwrap())
            .collect();

        let expected = ids_of(&events(total));
        prop_assert_eq!(ids_of(&paged), expected);
    }
}

// ============================================================================
// Bulk traversal
// ============================================================================

#[test]
fn bulk_with_no_sort_sends_tie_breaker_sort_first() {
    let service = Arc::new(SearchService::new(events(7)));
    let scroll = open(&service, 3);

    let _items: Vec<_> = scroll.bulk_stream().unwrap().map(|r| r.unwrap()).collect();

    // Request 0 was the facade's initial page; request 1 is the bulk
    // pager's re-issued first page under the rewritten sort
    let sent = &service.logged_requests()[1];
    assert_eq!(sent.sort[0], SortSpec::ascending("created"));
    assert_eq!(sent.sort[1], SortSpec::ascending("entityId"));
}

#[test]
fn bulk_with_explicit_sort_fails_without_network() {
    let service = Arc::new(SearchService::new(events(7)));
    let request = service
        .request(3)
        .with_sort(vec![SortSpec::descending("entity_name")]);
    let scroll = SearchScroll::open(Arc::clone(&service), request, AUDIT_SEARCH).unwrap();
    let fetches_before = service.fetch_count();

    let err = scroll.bulk_stream().unwrap_err();
    assert_eq!(
        err,
        Error::UnsafeBulkSort {
            field: "entity_name".to_string()
        }
    );
    assert_eq!(service.fetch_count(), fetches_before);
}

#[test]
fn bulk_deduplicates_boundary_collisions() {
    // Three records share one timestamp across a window edge of size 2
    let service = Arc::new(SearchService::new(events_at(&[500, 500, 500])));
    let request = service.request(2);
    let scroll = SearchScroll::open(Arc::clone(&service), request, SEARCH_LOG).unwrap();

    let items: Vec<_> = scroll.bulk_stream().unwrap().map(|r| r.unwrap()).collect();
    let unique: HashSet<String> = items.iter().map(|e| e.event_id.clone()).collect();
    assert_eq!(items.len(), 3);
    assert_eq!(unique.len(), 3);
}

#[test]
fn bulk_random_duplicate_heavy_timestamps() {
    // Many records squeezed into few distinct timestamps: every window
    // boundary collides
    let mut rng = StdRng::seed_from_u64(0x5ea_c4);
    let times: Vec<i64> = (0..400).map(|_| rng.gen_range(0..40)).collect();

    let service = Arc::new(SearchService::new(events_at(&times)));
    let request = service.request(7);
    let scroll = SearchScroll::open(Arc::clone(&service), request, SEARCH_LOG).unwrap();

    let items: Vec<_> = scroll.bulk_stream().unwrap().map(|r| r.unwrap()).collect();
    let unique: HashSet<String> = items.iter().map(|e| e.event_id.clone()).collect();
    assert_eq!(items.len(), 400);
    assert_eq!(unique.len(), 400);
}

#[test]
fn bulk_survives_appends_during_traversal() {
    // Records appended behind the read position must not disturb the
    // records that existed when the traversal began
    let initial = events(20);
    let service = Arc::new(SearchService::new(initial.clone()));
    let scroll = open(&service, 4);

    let mut stream = scroll.bulk_stream().unwrap();
    let mut collected = Vec::new();
    for _ in 0..8 {
        collected.push(stream.next().unwrap().unwrap());
    }

    // Late arrivals with later timestamps and fresh identities
    service.append(vec![
        common::LogEvent {
            event_id: "late-000001".to_string(),
            created: 1_700_000_000_900,
            entity_name: "entity-late".to_string(),
        },
        common::LogEvent {
            event_id: "late-000002".to_string(),
            created: 1_700_000_000_901,
            entity_name: "entity-late".to_string(),
        },
    ]);

    for item in stream {
        collected.push(item.unwrap());
    }

    let collected_ids: HashSet<String> =
        collected.iter().map(|e| e.event_id.clone()).collect();
    for original in &initial {
        assert!(
            collected_ids.contains(&original.event_id),
            "record {} dropped",
            original.event_id
        );
    }
    // Nothing emitted twice
    assert_eq!(collected_ids.len(), collected.len());
}

// ============================================================================
// Parallel traversal
// ============================================================================

#[test]
fn parallel_traversal_matches_sequential_multiset() {
    // 5 pages plus a remainder
    let total = 5 * 16 + 9;
    let service = Arc::new(SearchService::new(events(total)));

    let parallel: HashSet<String> = open(&service, 16)
        .parallel_stream(4)
        .unwrap()
        .map(|r| r.unwrap().event_id)
        .collect();

    let sequential: HashSet<String> = events(total)
        .iter()
        .map(|e| e.event_id.clone())
        .collect();
    assert_eq!(parallel, sequential);
}

#[test]
fn parallel_first_page_not_refetched() {
    let service = Arc::new(SearchService::new(events(64)));
    let scroll = open(&service, 8);

    let _items: Vec<_> = scroll
        .parallel_stream(3)
        .unwrap()
        .map(|r| r.unwrap())
        .collect();

    let zero_offset_fetches = service
        .logged_requests()
        .iter()
        .filter(|r| r.from == Some(0))
        .count();
    assert_eq!(zero_offset_fetches, 1, "offset 0 fetched exactly once");
}

// ============================================================================
// Failure surfacing
// ============================================================================

#[test]
fn transport_failure_terminates_sequential_stream() {
    let service = Arc::new(SearchService::new(events(30)).fail_on_fetch(2));
    let results: Vec<_> = open(&service, 10).stream().unwrap().collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 20);
    assert!(matches!(
        results.last(),
        Some(Err(Error::Fetch { .. }))
    ));
}
