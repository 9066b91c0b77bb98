//! Minimal composable filter tree.
//!
//! The engine treats the caller's filter as opaque: whatever the query DSL
//! produced arrives as a [`Query::Raw`] leaf and is handed back to the
//! transport untouched. The only algebra the engine itself needs is the
//! ability to conjoin a lower bound onto the original filter when
//! re-anchoring a windowed bulk fetch, so that is all this tree models.
//! Query planning, validation, and builder conveniences are out of scope.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// An opaque filter plus the engine's own range conjunctions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Query {
    /// Match everything (no caller filter)
    All,

    /// The caller's filter DSL output, passed through verbatim
    Raw(JsonValue),

    /// Conjunction of sub-filters
    And(Vec<Query>),

    /// Inclusive lower bound on a single field
    RangeGte {
        /// Field the bound applies to
        field: String,
        /// Inclusive lower bound value
        value: i64,
    },
}

impl Query {
    /// Wrap a caller-supplied DSL value as an opaque leaf
    pub fn raw(value: JsonValue) -> Self {
        Query::Raw(value)
    }

    /// Conjoin an inclusive lower bound onto this filter.
    ///
    /// Flattens into an existing top-level `And` so repeated re-anchoring
    /// does not nest; an earlier bound on the same field is replaced rather
    /// than accumulated.
    pub fn with_range_gte(self, field: impl Into<String>, value: i64) -> Self {
        let field = field.into();
        let bound = Query::RangeGte {
            field: field.clone(),
            value,
        };

        match self {
            Query::All => bound,
            Query::And(mut parts) => {
                parts.retain(|p| !matches!(p, Query::RangeGte { field: f, .. } if *f == field));
                parts.push(bound);
                Query::And(parts)
            }
            other => Query::And(vec![other, bound]),
        }
    }
}

impl Default for Query {
    fn default() -> Self {
        Query::All
    }
}
