//! # Node
//!
//! One note of the knowledge base.
//!
//! A node never holds references to other nodes. Its outbound links are raw
//! identifier strings, so resolving a link is a set-membership test against
//! whatever graph the node currently sits in.

use crate::RoamError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// A single note: identity, location, title, tags and outbound links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Stable identifier assigned by the note system. Unique within a graph.
    pub id: String,
    /// Path of the source note.
    pub filename: String,
    /// Human-readable title. Not guaranteed unique.
    pub title: String,
    /// Tags attached to the note.
    pub tags: BTreeSet<String>,
    /// Identifiers referenced from the note body. May dangle.
    pub links_to: BTreeSet<String>,
}

impl Node {
    /// Create a new node. Argument order follows the ingestion row order.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        title: impl Into<String>,
        id: impl Into<String>,
        tags: BTreeSet<String>,
        links_to: BTreeSet<String>,
    ) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            title: title.into(),
            tags,
            links_to,
        }
    }

    /// True iff this note carries at least one of `tags`.
    ///
    /// Returns `RoamError::InvalidArgument` for an empty filter set.
    pub fn has_tag<S: AsRef<str>>(&self, tags: &[S]) -> Result<bool, RoamError> {
        if tags.is_empty() {
            return Err(RoamError::InvalidArgument(
                "tag filter set must not be empty".to_string(),
            ));
        }
        Ok(tags.iter().any(|tag| self.tags.contains(tag.as_ref())))
    }

    /// True iff any pattern matches anywhere inside any of this note's tags.
    ///
    /// Matching is unanchored search, so `"proj"` matches the tag `"project"`.
    pub fn has_regex_tag(&self, patterns: &[Regex]) -> Result<bool, RoamError> {
        if patterns.is_empty() {
            return Err(RoamError::InvalidArgument(
                "pattern filter set must not be empty".to_string(),
            ));
        }
        Ok(patterns
            .iter()
            .any(|pattern| self.tags.iter().any(|tag| pattern.is_match(tag))))
    }

    /// Link test against another note.
    ///
    /// Directed: `other.id` is one of this note's outbound links.
    /// Undirected: either note links to the other.
    #[must_use]
    pub fn links(&self, other: &Node, directed: bool) -> bool {
        if directed {
            self.links_to_id(&other.id)
        } else {
            self.links_to_id(&other.id) || other.links_to_id(&self.id)
        }
    }

    /// Check whether `id` is among this note's outbound links.
    #[must_use]
    pub fn links_to_id(&self, id: &str) -> bool {
        self.links_to.contains(id)
    }

    /// Whether the note links to anything at all.
    #[must_use]
    pub fn has_outbound(&self) -> bool {
        !self.links_to.is_empty()
    }

    /// Final path component of `filename`, or the whole string if it has none.
    #[must_use]
    pub fn base_filename(&self) -> &str {
        Path::new(&self.filename)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.filename)
    }
}

// =============================================================================
// TESTS
// =============================================================================
