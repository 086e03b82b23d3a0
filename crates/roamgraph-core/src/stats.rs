//! # Graph Statistics
//!
//! Summary counts for a note graph.
//!
//! Edge counts only include links that resolve to a node of the graph being
//! measured; dangling ids are not edges.

use crate::Graph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Summary counts extracted from a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Total number of notes.
    pub node_count: usize,
    /// Ordered pairs `(i, j)`, `i != j`, where note `i` links to note `j`.
    pub edge_count: usize,
    /// Notes with no outbound and no inbound links.
    pub orphan_count: usize,
    /// Notes carrying at least one tag.
    pub tagged_count: usize,
    /// Distinct tags across all notes.
    pub distinct_tags: usize,
    /// Number of link targets that do not resolve to a note of this graph.
    pub dangling_links: usize,
}

impl GraphStats {
    /// Stats for an empty graph.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            node_count: 0,
            edge_count: 0,
            orphan_count: 0,
            tagged_count: 0,
            distinct_tags: 0,
            dangling_links: 0,
        }
    }

    /// Compute stats from a graph.
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        if graph.is_empty() {
            return Self::empty();
        }

        let ids: BTreeSet<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();

        let mut edge_count = 0usize;
        let mut dangling_links = 0usize;
        for node in graph.nodes() {
            for target in &node.links_to {
                if !ids.contains(target.as_str()) {
                    dangling_links = dangling_links.saturating_add(1);
                } else if *target != node.id {
                    edge_count = edge_count.saturating_add(1);
                }
            }
        }

        let distinct_tags = graph
            .nodes()
            .iter()
            .flat_map(|n| n.tags.iter())
            .collect::<BTreeSet<_>>()
            .len();

        Self {
            node_count: graph.len(),
            edge_count,
            orphan_count: graph.orphans().len(),
            tagged_count: graph.nodes().iter().filter(|n| !n.tags.is_empty()).count(),
            distinct_tags,
            dangling_links,
        }
    }

    /// Edges per node, in parts per thousand (integer only).
    #[must_use]
    pub fn density_per_thousand(&self) -> u64 {
        if self.node_count == 0 {
            return 0;
        }
        (self.edge_count as u64).saturating_mul(1000) / (self.node_count as u64)
    }
}

// =============================================================================
// TESTS
// =============================================================================
