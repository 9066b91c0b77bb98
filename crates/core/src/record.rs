//! Record identity and tie-breaker access.
//!
//! The engine is generic over the typed results a backend returns. It needs
//! exactly two facts about a record: a stable unique identity (used to
//! deduplicate at window boundaries — never a structural hash, which could
//! collide or drift as mutable fields change) and the value of the
//! profile's monotonic tie-breaker field.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// RecordId
// ============================================================================

/// Stable unique identity of one record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap a backend-assigned identity
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    /// The identity as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId(s)
    }
}

// ============================================================================
// Record
// ============================================================================

/// Minimal view of a typed search result the engine can traverse.
///
/// Implemented by each backend variant's result model. `tie_breaker` must
/// return the value of the field named by the variant's
/// [`BackendProfile`](crate::BackendProfile) for windowed bulk traversal to
/// make forward progress; for fields a record genuinely lacks it returns
/// `None` and the traversal fails rather than silently skipping.
pub trait Record {
    /// Stable unique identity of this record
    fn id(&self) -> RecordId;

    /// Value of the named monotonic field, e.g. a creation timestamp in
    /// epoch millis
    fn tie_breaker(&self, field: &str) -> Option<i64>;
}
