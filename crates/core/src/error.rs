//! Error types for the result-iteration engine.
//!
//! All errors surfaced by the engine are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Terminal**: A fetch or cursor failure ends the traversal; the engine
//!   performs no retries of its own
//!
//! End-of-results is never an error — a short or empty page is the normal
//! termination signal and produces no variant here.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while building or driving a traversal.
///
/// Pull-based iteration cannot carry a checked failure through `next()`,
/// so fetch failures are surfaced as an `Err` item at the point of pulling
/// and the traversal then terminates. Retry policy, if any, belongs to the
/// transport beneath [`PageFetcher`](crate::PageFetcher).
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Transport | `Fetch` | Network/backend failure during a page fetch |
/// | Precondition | `UnsafeBulkSort`, `InvalidPageSize` | Rejected before any fetch |
/// | Continuation | `InvalidCursor` | Forward-progress state is unusable |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // ==================== Transport ====================
    /// A page fetch failed (network error or backend-reported error).
    #[error("page fetch failed: {message}")]
    Fetch {
        /// Transport- or backend-supplied failure description
        message: String,
    },

    // ==================== Precondition ====================
    /// An explicit non-default sort was combined with bulk traversal.
    ///
    /// Bulk traversal cannot honor an arbitrary caller ordering while also
    /// guaranteeing completeness, so construction fails before any network
    /// call rather than silently reordering results.
    #[error("bulk traversal cannot preserve explicit sort on field '{field}'")]
    UnsafeBulkSort {
        /// First non-default sort field the caller requested
        field: String,
    },

    /// A page size of zero was supplied.
    #[error("page size must be greater than zero (given {given})")]
    InvalidPageSize {
        /// The rejected page size
        given: usize,
    },

    // ==================== Continuation ====================
    /// A continuation token or boundary value could not be used.
    ///
    /// Forward progress depends on the continuation state being exact, so
    /// this is fatal for the traversal.
    #[error("invalid continuation state: {reason}")]
    InvalidCursor {
        /// What made the continuation state unusable
        reason: String,
    },
}

impl Error {
    /// Build a [`Error::Fetch`] from any displayable transport failure.
    pub fn fetch(message: impl Into<String>) -> Self {
        Error::Fetch {
            message: message.into(),
        }
    }

    /// Build an [`Error::InvalidCursor`] with the given reason.
    pub fn invalid_cursor(reason: impl Into<String>) -> Self {
        Error::InvalidCursor {
            reason: reason.into(),
        }
    }
}
