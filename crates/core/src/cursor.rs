//! Opaque continuation tokens for cursor-capable backends.
//!
//! A cursor token is the ordered tuple of sort values the backend reported
//! for one item (search-after style). The engine never inspects the values;
//! it only carries the token of the last consumed item into the next page
//! request. Tokens round-trip through serde so transports can put them on
//! the wire verbatim.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Opaque sort-value tuple identifying a resume position
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CursorToken(Vec<JsonValue>);

impl CursorToken {
    /// Wrap the sort values the backend reported for one item
    pub fn new(values: Vec<JsonValue>) -> Self {
        CursorToken(values)
    }

    /// Borrow the raw sort values
    pub fn values(&self) -> &[JsonValue] {
        &self.0
    }

    /// True when the token carries no values (unusable as a resume point)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<JsonValue>> for CursorToken {
    fn from(values: Vec<JsonValue>) -> Self {
        CursorToken(values)
    }
}
