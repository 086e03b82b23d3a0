//! # Graph Engine
//!
//! The note graph: an ordered list of nodes and everything derived from it.
//!
//! Node order is ingestion order, and it fixes the row/column index of every
//! matrix built from the graph. Filtering and orphan removal are
//! copy-on-write: they return a new `Graph` and leave the receiver alone, so
//! a caller can keep consulting the original next to any filtered view.

use crate::ingest::{NoteRows, NoteSource};
use crate::matrix::Matrix;
use crate::primitives::{LINK_WEIGHT, NO_EDGE};
use crate::shortest_path::{FloydWarshall, ShortestPathEngine};
use crate::{Node, Orientation, RoamError};
use regex::Regex;
use std::collections::BTreeSet;

// =============================================================================
// GRAPH IMPLEMENTATION
// =============================================================================

/// An ordered collection of notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a list of nodes, keeping their order.
    ///
    /// Returns `RoamError::DuplicateId` if two nodes share an id.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self, RoamError> {
        let mut seen = BTreeSet::new();
        for node in &nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(RoamError::DuplicateId(node.id.clone()));
            }
        }
        Ok(Self { nodes })
    }

    /// Build a graph from row-aligned ingestion columns.
    ///
    /// `nodes[i]` is assembled from row `i` of every column.
    pub fn from_rows(rows: NoteRows) -> Result<Self, RoamError> {
        let count = rows.len()?;
        let NoteRows {
            filenames,
            titles,
            ids,
            tags,
            links,
        } = rows;

        let mut nodes = Vec::with_capacity(count);
        for ((((filename, title), id), tags), links) in filenames
            .into_iter()
            .zip(titles)
            .zip(ids)
            .zip(tags)
            .zip(links)
        {
            nodes.push(Node::new(filename, title, id, tags, links));
        }

        let graph = Self::from_nodes(nodes)?;
        tracing::debug!(nodes = graph.len(), "graph built from rows");
        Ok(graph)
    }

    /// Read every row from `source` and build a graph from it.
    ///
    /// Ingestion failures propagate; they never turn into an empty graph.
    pub fn load<S: NoteSource + ?Sized>(source: &S) -> Result<Self, RoamError> {
        Self::from_rows(source.fetch_rows()?)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// All nodes in index order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of the node with the given id.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    /// Node with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Filenames in index order, optionally reduced to their base name.
    #[must_use]
    pub fn filenames(&self, base_only: bool) -> Vec<&str> {
        self.nodes
            .iter()
            .map(|node| {
                if base_only {
                    node.base_filename()
                } else {
                    node.filename.as_str()
                }
            })
            .collect()
    }

    /// Ids in index order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|node| node.id.as_str()).collect()
    }

    /// Titles in index order.
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.nodes.iter().map(|node| node.title.as_str()).collect()
    }

    /// Each note's title paired with the titles of the notes it links to.
    ///
    /// Targets are resolved against this graph only and listed in graph
    /// order. Ids with no node here are dropped.
    #[must_use]
    pub fn links(&self) -> Vec<(&str, Vec<&str>)> {
        self.nodes
            .iter()
            .map(|source| {
                let targets = self
                    .nodes
                    .iter()
                    .filter(|target| source.links_to_id(&target.id))
                    .map(|target| target.title.as_str())
                    .collect();
                (source.title.as_str(), targets)
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Subgraph by tag.
    ///
    /// With `exclude`, nodes carrying any of `tags` are dropped; without it,
    /// only those nodes are kept. With `regex`, every entry of `tags` is
    /// compiled and matched unanchored against each tag.
    ///
    /// Fails with `RoamError::InvalidArgument` for an empty `tags` before any
    /// work is done, and with `RoamError::InvalidPattern` if a pattern does
    /// not compile.
    pub fn filter_tags<S: AsRef<str>>(
        &self,
        tags: &[S],
        exclude: bool,
        regex: bool,
    ) -> Result<Self, RoamError> {
        if tags.is_empty() {
            return Err(RoamError::InvalidArgument(
                "filter_tags requires at least one tag or pattern".to_string(),
            ));
        }

        if regex {
            let patterns = tags
                .iter()
                .map(|tag| {
                    Regex::new(tag.as_ref()).map_err(|e| RoamError::InvalidPattern {
                        pattern: tag.as_ref().to_string(),
                        reason: e.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            return self.filter_regex(&patterns, exclude);
        }

        self.retain_where(exclude, |node| node.has_tag(tags))
    }

    /// Subgraph by precompiled tag patterns. Keep logic as `filter_tags`.
    pub fn filter_regex(&self, patterns: &[Regex], exclude: bool) -> Result<Self, RoamError> {
        if patterns.is_empty() {
            return Err(RoamError::InvalidArgument(
                "filter_regex requires at least one pattern".to_string(),
            ));
        }
        self.retain_where(exclude, |node| node.has_regex_tag(patterns))
    }

    /// Copy the nodes whose predicate value differs from `exclude`.
    fn retain_where<F>(&self, exclude: bool, predicate: F) -> Result<Self, RoamError>
    where
        F: Fn(&Node) -> Result<bool, RoamError>,
    {
        let mut kept = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if predicate(node)? != exclude {
                kept.push(node.clone());
            }
        }

        tracing::debug!(
            kept = kept.len(),
            removed = self.nodes.len() - kept.len(),
            exclude,
            "tag filter applied"
        );
        Ok(Self { nodes: kept })
    }

    // -------------------------------------------------------------------------
    // Orphans
    // -------------------------------------------------------------------------

    /// Ids referenced by at least one node of this graph.
    fn referenced_ids(&self) -> BTreeSet<&str> {
        self.nodes
            .iter()
            .flat_map(|node| node.links_to.iter().map(String::as_str))
            .collect()
    }

    /// Orphan test against a precomputed reference set.
    ///
    /// A node referencing itself has a non-empty `links_to`, so counting its
    /// own links among the references never changes the outcome.
    fn orphaned(node: &Node, referenced: &BTreeSet<&str>) -> bool {
        !node.has_outbound() && !referenced.contains(node.id.as_str())
    }

    /// True iff `nodes[index]` links to nothing and nothing here links to it.
    ///
    /// Out-of-range indices are not orphans.
    #[must_use]
    pub fn is_orphan(&self, index: usize) -> bool {
        let Some(node) = self.nodes.get(index) else {
            return false;
        };
        !node.has_outbound()
            && !self
                .nodes
                .iter()
                .enumerate()
                .any(|(j, other)| j != index && other.links_to_id(&node.id))
    }

    /// All orphan nodes, in index order.
    #[must_use]
    pub fn orphans(&self) -> Vec<&Node> {
        let referenced = self.referenced_ids();
        self.nodes
            .iter()
            .filter(|node| Self::orphaned(node, &referenced))
            .collect()
    }

    /// Copy of this graph without its orphans.
    ///
    /// Orphan status is judged once against this graph's full node list, in
    /// a single pass. An orphan references nothing, so dropping it cannot
    /// orphan anyone else and a second application is a no-op.
    #[must_use]
    pub fn remove_orphans(&self) -> Self {
        let referenced = self.referenced_ids();
        let nodes: Vec<Node> = self
            .nodes
            .iter()
            .filter(|node| !Self::orphaned(node, &referenced))
            .cloned()
            .collect();

        tracing::debug!(
            kept = nodes.len(),
            removed = self.nodes.len() - nodes.len(),
            "orphans removed"
        );
        Self { nodes }
    }

    // -------------------------------------------------------------------------
    // Matrices
    // -------------------------------------------------------------------------

    /// N×N adjacency matrix over the current nodes.
    ///
    /// Off-diagonal cells are `1.0` for an edge and `+inf` otherwise. The
    /// diagonal stays `0.0`. `Reversed` is the transpose of `Forward`;
    /// `Undirected` tests each unordered pair once and mirrors it.
    #[must_use]
    pub fn adjacency_matrix(&self, orientation: Orientation) -> Matrix {
        let n = self.nodes.len();
        let mut matrix = Matrix::zeros(n);

        match orientation {
            Orientation::Undirected => {
                for i in 0..n {
                    for j in (i + 1)..n {
                        let weight = edge_weight(self.nodes[i].links(&self.nodes[j], false));
                        matrix.set(i, j, weight);
                        matrix.set(j, i, weight);
                    }
                }
            }
            Orientation::Forward | Orientation::Reversed => {
                for i in 0..n {
                    for j in 0..n {
                        if i != j {
                            let weight = edge_weight(self.nodes[i].links(&self.nodes[j], true));
                            matrix.set(i, j, weight);
                        }
                    }
                }
                if orientation == Orientation::Reversed {
                    matrix = matrix.transpose();
                }
            }
        }

        tracing::debug!(size = n, %orientation, "adjacency matrix built");
        matrix
    }

    /// All-pairs shortest-path distances using `FloydWarshall`.
    pub fn distance_matrix(&self, orientation: Orientation) -> Result<Matrix, RoamError> {
        self.distance_matrix_with(&FloydWarshall, orientation)
    }

    /// All-pairs shortest-path distances using a caller-chosen engine.
    ///
    /// The adjacency matrix for `orientation` goes to the engine with its
    /// `directed` flag set from the orientation.
    pub fn distance_matrix_with<E: ShortestPathEngine + ?Sized>(
        &self,
        engine: &E,
        orientation: Orientation,
    ) -> Result<Matrix, RoamError> {
        let adjacency = self.adjacency_matrix(orientation);
        engine.all_pairs(&adjacency, orientation.is_directed())
    }
}

#[inline]
fn edge_weight(linked: bool) -> f64 {
    if linked { LINK_WEIGHT } else { NO_EDGE }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn note(id: &str, tags: &[&str], links: &[&str]) -> Node {
        Node::new(
            format!("/notes/{id}.org"),
            id.to_uppercase(),
            id,
            set(tags),
            set(links),
        )
    }

    fn graph(nodes: Vec<Node>) -> Graph {
        Graph::from_nodes(nodes).expect("graph")
    }

    /// a -> b, b and c link nowhere.
    fn abc() -> Graph {
        graph(vec![
            note("a", &["math"], &["b"]),
            note("b", &["draft"], &[]),
            note("c", &[], &[]),
        ])
    }

    #[test]
    fn from_rows_zips_columns() {
        let mut rows = NoteRows::new();
        rows.push("/x/a.org", "A", "a", set(&["t"]), set(&["b"]));
        rows.push("/x/b.org", "B", "b", BTreeSet::new(), BTreeSet::new());

        let g = Graph::from_rows(rows).expect("graph");
        assert_eq!(g.ids(), vec!["a", "b"]);
        assert_eq!(g.titles(), vec!["A", "B"]);
        assert!(g.nodes()[0].links_to_id("b"));
    }

    #[test]
    fn from_rows_rejects_mismatched_columns() {
        let mut rows = NoteRows::new();
        rows.push("a.org", "A", "a", BTreeSet::new(), BTreeSet::new());
        rows.links.clear();

        assert!(matches!(
            Graph::from_rows(rows),
            Err(RoamError::MismatchedRowLengths { column: "links", .. })
        ));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = Graph::from_nodes(vec![note("a", &[], &[]), note("a", &[], &[])]);
        assert!(matches!(result, Err(RoamError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn load_propagates_ingestion_errors() {
        struct Broken;
        impl NoteSource for Broken {
            fn fetch_rows(&self) -> Result<NoteRows, RoamError> {
                Err(RoamError::Ingestion("connection refused".to_string()))
            }
        }

        assert!(matches!(Graph::load(&Broken), Err(RoamError::Ingestion(_))));
    }

    #[test]
    fn empty_rows_give_empty_graph() {
        let g = Graph::load(&NoteRows::new()).expect("graph");
        assert!(g.is_empty());
        assert!(g.adjacency_matrix(Orientation::Forward).is_empty());
    }

    #[test]
    fn lookup_by_id() {
        let g = abc();
        assert_eq!(g.index_of("c"), Some(2));
        assert_eq!(g.get("b").map(|n| n.title.as_str()), Some("B"));
        assert!(g.get("zzz").is_none());
    }

    #[test]
    fn filenames_full_and_base() {
        let g = abc();
        assert_eq!(g.filenames(true), vec!["a.org", "b.org", "c.org"]);
        assert_eq!(g.filenames(false)[0], "/notes/a.org");
    }

    #[test]
    fn links_resolve_titles_and_drop_dangling() {
        let g = graph(vec![
            note("a", &[], &["b", "ghost"]),
            note("b", &[], &["a"]),
        ]);

        let links = g.links();
        assert_eq!(links[0], ("A", vec!["B"]));
        assert_eq!(links[1], ("B", vec!["A"]));
    }

    #[test]
    fn filter_exclude_removes_tagged() {
        let g = abc();
        let filtered = g.filter_tags(&["draft"], true, false).expect("filter");
        assert_eq!(filtered.ids(), vec!["a", "c"]);
        // receiver untouched
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn filter_include_keeps_tagged() {
        let filtered = abc().filter_tags(&["draft", "math"], false, false).expect("filter");
        assert_eq!(filtered.ids(), vec!["a", "b"]);
    }

    #[test]
    fn filter_rejects_empty_tags() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            abc().filter_tags(&empty, true, false),
            Err(RoamError::InvalidArgument(_))
        ));
        assert!(abc().filter_tags(&empty, true, true).is_err());
    }

    #[test]
    fn filter_regex_matches_partially() {
        let filtered = abc().filter_tags(&["dra"], false, true).expect("filter");
        assert_eq!(filtered.ids(), vec!["b"]);

        let literal = abc().filter_tags(&["dra"], false, false).expect("filter");
        assert!(literal.is_empty());
    }

    #[test]
    fn filter_regex_bad_pattern() {
        assert!(matches!(
            abc().filter_tags(&["(unclosed"], true, true),
            Err(RoamError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn filter_keeps_dangling_links() {
        let filtered = abc().filter_tags(&["draft"], true, false).expect("filter");
        // b is gone, a still points at it
        assert!(filtered.nodes()[0].links_to_id("b"));
        let adj = filtered.adjacency_matrix(Orientation::Forward);
        assert_eq!(adj.get(0, 1), Some(NO_EDGE));
    }

    #[test]
    fn orphan_rule() {
        let g = abc();
        assert!(!g.is_orphan(0), "a has outbound links");
        assert!(!g.is_orphan(1), "b has an inbound link");
        assert!(g.is_orphan(2), "c is isolated");
        assert!(!g.is_orphan(99));
        assert_eq!(g.orphans().len(), 1);
    }

    #[test]
    fn remove_orphans_scenario() {
        let pruned = abc().remove_orphans();
        assert_eq!(pruned.ids(), vec!["a", "b"]);
    }

    #[test]
    fn orphan_status_is_relative_to_current_nodes() {
        // c is referenced only by a; once a is filtered out, c is an orphan
        // of the filtered view while staying connected in the original.
        let g = graph(vec![note("a", &["x"], &["c"]), note("c", &[], &[])]);
        let without_a = g.filter_tags(&["x"], true, false).expect("filter");
        assert_eq!(without_a.remove_orphans().len(), 0);
        assert_eq!(g.remove_orphans().len(), 2);
    }

    #[test]
    fn remove_orphans_is_idempotent() {
        let once = abc().remove_orphans();
        let twice = once.remove_orphans();
        assert_eq!(once, twice);
    }

    #[test]
    fn self_link_is_not_an_orphan() {
        let g = graph(vec![note("a", &[], &["a"])]);
        assert!(!g.is_orphan(0));
        assert_eq!(g.remove_orphans().len(), 1);
        let adj = g.adjacency_matrix(Orientation::Forward);
        assert_eq!(adj.get(0, 0), Some(0.0));
    }

    #[test]
    fn adjacency_directed_scenario() {
        let g = graph(vec![note("a", &[], &["b"]), note("b", &[], &[])]);

        let forward = g.adjacency_matrix(Orientation::Forward);
        assert_eq!(forward.get(0, 1), Some(1.0));
        assert_eq!(forward.get(1, 0), Some(NO_EDGE));

        let undirected = g.adjacency_matrix(Orientation::Undirected);
        assert_eq!(undirected.get(0, 1), Some(1.0));
        assert_eq!(undirected.get(1, 0), Some(1.0));
    }

    #[test]
    fn adjacency_reversed_is_transpose() {
        let g = abc();
        let forward = g.adjacency_matrix(Orientation::Forward);
        let reversed = g.adjacency_matrix(Orientation::Reversed);
        assert_eq!(reversed, forward.transpose());
        assert_eq!(reversed.get(1, 0), Some(1.0));
    }

    #[test]
    fn adjacency_diagonal_zero_and_undirected_symmetric() {
        let g = abc();
        for orientation in [Orientation::Undirected, Orientation::Forward, Orientation::Reversed] {
            let m = g.adjacency_matrix(orientation);
            for i in 0..g.len() {
                assert_eq!(m.get(i, i), Some(0.0));
            }
        }
        assert!(g.adjacency_matrix(Orientation::Undirected).is_symmetric());
    }

    #[test]
    fn distance_matrix_walks_chains() {
        // a -> b -> c
        let g = graph(vec![
            note("a", &[], &["b"]),
            note("b", &[], &["c"]),
            note("c", &[], &[]),
        ]);

        let forward = g.distance_matrix(Orientation::Forward).expect("distances");
        assert_eq!(forward.get(0, 2), Some(2.0));
        assert_eq!(forward.get(2, 0), Some(NO_EDGE));

        let reversed = g.distance_matrix(Orientation::Reversed).expect("distances");
        assert_eq!(reversed.get(2, 0), Some(2.0));
        assert_eq!(reversed.get(0, 2), Some(NO_EDGE));

        let undirected = g.distance_matrix(Orientation::Undirected).expect("distances");
        assert_eq!(undirected.get(2, 0), Some(2.0));
        assert!(undirected.is_symmetric());
    }

    #[test]
    fn distance_matrix_with_custom_engine() {
        struct Echo;
        impl ShortestPathEngine for Echo {
            fn all_pairs(&self, weights: &Matrix, _directed: bool) -> Result<Matrix, RoamError> {
                Ok(weights.clone())
            }
        }

        let g = abc();
        let echoed = g
            .distance_matrix_with(&Echo, Orientation::Forward)
            .expect("distances");
        assert_eq!(echoed, g.adjacency_matrix(Orientation::Forward));
    }
}
