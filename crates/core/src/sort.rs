//! Sort criteria attached to a page request.
//!
//! A sort is an ordered list of [`SortSpec`] entries. The engine never
//! interprets field names beyond comparing them against the backend
//! profile's tie-breaker field; classification and rewriting live in the
//! engine's sort policy, not here.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// SortDirection
// ============================================================================

/// Direction of one sort criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest value first (default)
    #[default]
    Ascending,
    /// Largest value first
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

// ============================================================================
// SortSpec
// ============================================================================

/// One sort criterion: a field name plus a direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field the backend should order by
    pub field: String,

    /// Direction of the ordering
    pub direction: SortDirection,
}

impl SortSpec {
    /// Create an ascending sort on `field`
    pub fn ascending(field: impl Into<String>) -> Self {
        SortSpec {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Create a descending sort on `field`
    pub fn descending(field: impl Into<String>) -> Self {
        SortSpec {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Check whether this criterion orders `field` ascending
    pub fn is_ascending_on(&self, field: &str) -> bool {
        self.field == field && self.direction == SortDirection::Ascending
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction)
    }
}
