//! # Core Type Definitions
//!
//! Shared types for the note graph:
//! - Matrix orientation (`Orientation`)
//! - Error types (`RoamError`)

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// ORIENTATION
// =============================================================================

/// How link direction is read when building a matrix.
///
/// The two boolean knobs callers usually have (`directed`, `reverse`) only
/// produce three distinct matrices, so they collapse into this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// A link in either direction is an edge. The matrix is symmetric.
    #[default]
    Undirected,
    /// `[i, j]` is an edge when note `i` links to note `j`.
    Forward,
    /// Transpose of `Forward`: `[i, j]` is an edge when note `j` links to note `i`.
    Reversed,
}

impl Orientation {
    /// Map the `directed` / `reverse` flag pair onto an orientation.
    ///
    /// `reverse` has no meaning for an undirected graph and is ignored there.
    #[must_use]
    pub fn from_flags(directed: bool, reverse: bool) -> Self {
        match (directed, reverse) {
            (false, reverse) => {
                if reverse {
                    tracing::debug!("reverse ignored for undirected orientation");
                }
                Self::Undirected
            }
            (true, false) => Self::Forward,
            (true, true) => Self::Reversed,
        }
    }

    /// Whether edges keep their source → target direction.
    #[must_use]
    pub const fn is_directed(self) -> bool {
        !matches!(self, Self::Undirected)
    }

    /// Get the orientation name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undirected => "undirected",
            Self::Forward => "forward",
            Self::Reversed => "reversed",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building or querying a note graph.
///
/// - No silent failures: an empty graph is a valid result, an error is not
/// - Use `Result<T, RoamError>` for fallible operations
/// - The core never panics
#[derive(Debug, Error)]
pub enum RoamError {
    /// The ingestion source was unreachable or a query against it failed.
    #[error("Ingestion failed: {0}")]
    Ingestion(String),

    /// An operation was called with an argument it cannot act on.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The ingestion rows do not line up.
    #[error("Mismatched row lengths: column `{column}` has {found} rows, expected {expected}")]
    MismatchedRowLengths {
        /// Name of the offending column.
        column: &'static str,
        /// Row count of the `ids` column.
        expected: usize,
        /// Row count of the offending column.
        found: usize,
    },

    /// Two notes share the same identifier.
    #[error("Duplicate note id: {0}")]
    DuplicateId(String),

    /// A tag pattern failed to compile.
    #[error("Invalid tag pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The pattern as supplied.
        pattern: String,
        /// The regex engine's message.
        reason: String,
    },

    /// A matrix is malformed (not square, negative or NaN weights).
    #[error("Invalid matrix: {0}")]
    InvalidMatrix(String),
}

// =============================================================================
// TESTS
// =============================================================================
