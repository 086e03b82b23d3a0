//! # Ingestion
//!
//! The contract between a note store and the graph.
//!
//! A store hands over five row-aligned columns, one row per note, ordered by
//! ascending note id. The graph never reaches for a store on its own: the
//! caller passes a `NoteSource` into `Graph::load`, and the source owns any
//! connection for the duration of that call only.

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::RoamDb;

use crate::RoamError;
use crate::primitives::QUOTE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// NOTE SOURCE TRAIT
// =============================================================================

/// Anything that can produce note rows.
///
/// Implementations must surface connectivity and query failures as
/// `RoamError::Ingestion` instead of returning empty or partial rows.
pub trait NoteSource {
    /// Read every note row from the source.
    fn fetch_rows(&self) -> Result<NoteRows, RoamError>;
}

// =============================================================================
// NOTE ROWS
// =============================================================================

/// Five parallel columns describing a note collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRows {
    /// Source file of each note.
    pub filenames: Vec<String>,
    /// Title of each note.
    pub titles: Vec<String>,
    /// Identifier of each note.
    pub ids: Vec<String>,
    /// Tag set of each note.
    pub tags: Vec<BTreeSet<String>>,
    /// Outbound link targets of each note.
    pub links: Vec<BTreeSet<String>>,
}

impl NoteRows {
    /// Create an empty row set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one note to every column.
    pub fn push(
        &mut self,
        filename: impl Into<String>,
        title: impl Into<String>,
        id: impl Into<String>,
        tags: BTreeSet<String>,
        links: BTreeSet<String>,
    ) {
        self.filenames.push(filename.into());
        self.titles.push(title.into());
        self.ids.push(id.into());
        self.tags.push(tags);
        self.links.push(links);
    }

    /// Common row count.
    ///
    /// The `ids` column sets the expected length. Any other column that
    /// differs yields `RoamError::MismatchedRowLengths`.
    pub fn len(&self) -> Result<usize, RoamError> {
        let expected = self.ids.len();
        let columns = [
            ("filenames", self.filenames.len()),
            ("titles", self.titles.len()),
            ("tags", self.tags.len()),
            ("links", self.links.len()),
        ];
        for (column, found) in columns {
            if found != expected {
                return Err(RoamError::MismatchedRowLengths {
                    column,
                    expected,
                    found,
                });
            }
        }
        Ok(expected)
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl NoteSource for NoteRows {
    fn fetch_rows(&self) -> Result<NoteRows, RoamError> {
        Ok(self.clone())
    }
}

/// Strip the quotes org-roam stores around string values.
#[must_use]
pub fn unquote(raw: &str) -> String {
    raw.replace(QUOTE, "")
}

// =============================================================================
// TESTS
// =============================================================================
