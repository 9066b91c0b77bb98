//! Sort classification and rewriting for bulk traversal.
//!
//! Pure functions over a sort-criteria list against one backend profile.
//! Bulk traversal only makes forward-progress guarantees when results
//! arrive ascending by the profile's monotonic tie-breaker field; these
//! functions decide whether a caller's sort already satisfies that, whether
//! the caller asked for a specific business ordering, and how to rewrite a
//! default sort into a cursor-safe one.

use searchstream_core::{BackendProfile, SortSpec};

/// True iff the first sort entry orders the profile's tie-breaker field
/// ascending.
pub fn is_cursor_safe(sort: &[SortSpec], profile: &BackendProfile) -> bool {
    sort.first()
        .is_some_and(|s| s.is_ascending_on(profile.tie_breaker_field))
}

/// True iff the sort contains criteria beyond the default
/// tie-breaker/uniqueness entries — i.e. the caller asked for a specific
/// business ordering.
pub fn has_explicit_user_sort(sort: &[SortSpec], profile: &BackendProfile) -> bool {
    sort.iter().any(|s| !is_default_field(&s.field, profile))
}

/// First sort field that is not a default entry, for error reporting.
pub fn first_explicit_field<'a>(sort: &'a [SortSpec], profile: &BackendProfile) -> Option<&'a str> {
    sort.iter()
        .find(|s| !is_default_field(&s.field, profile))
        .map(|s| s.field.as_str())
}

/// Rewrite a sort into a cursor-safe one.
///
/// The tie-breaker field is prepended ascending; if it was already present
/// anywhere in the list it is moved to the front rather than duplicated.
/// The profile's uniqueness field, when configured and absent, is appended
/// so the ordering is total. Idempotent.
pub fn force_cursor_safe(sort: Vec<SortSpec>, profile: &BackendProfile) -> Vec<SortSpec> {
    let rest: Vec<SortSpec> = sort
        .into_iter()
        .filter(|s| s.field != profile.tie_breaker_field)
        .collect();

    let mut safe = Vec::with_capacity(rest.len() + 2);
    safe.push(SortSpec::ascending(profile.tie_breaker_field));
    safe.extend(rest);

    if let Some(unique) = profile.unique_sort_field {
        if !safe.iter().any(|s| s.field == unique) {
            safe.push(SortSpec::ascending(unique));
        }
    }

    safe
}

fn is_default_field(field: &str, profile: &BackendProfile) -> bool {
    field == profile.tie_breaker_field || Some(field) == profile.unique_sort_field
}
