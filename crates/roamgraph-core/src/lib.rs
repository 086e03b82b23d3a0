//! # roamgraph-core
//!
//! The note-graph engine for roamgraph - THE LOGIC.
//!
//! Models a personal knowledge base (a directory of linked notes) as a
//! graph: each note is a node, and a link from one note's body to another
//! note's identifier is an edge.
//!
//! ## Data Flow
//!
//! ```text
//! NoteSource ──rows──▶ Graph ──filter_tags / remove_orphans──▶ Graph (copy)
//!                        │
//!                        ├── adjacency_matrix(orientation) ──▶ Matrix
//!                        └── distance_matrix(orientation) ───▶ ShortestPathEngine ──▶ Matrix
//! ```
//!
//! ## Architectural Constraints
//!
//! - Synchronous, no network dependencies
//! - Node order fixes matrix indices; matrices are snapshots
//! - Graphs are values: derived graphs never share mutable state
//! - Links are identifier strings resolved by lookup, never object pointers

// =============================================================================
// MODULES
// =============================================================================

pub mod graph;
pub mod ingest;
pub mod matrix;
pub mod node;
pub mod primitives;
pub mod shortest_path;
pub mod stats;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use graph::Graph;
#[cfg(feature = "sqlite")]
pub use ingest::RoamDb;
pub use ingest::{NoteRows, NoteSource};
pub use matrix::Matrix;
pub use node::Node;
pub use shortest_path::{FloydWarshall, ShortestPathEngine};
pub use stats::GraphStats;
pub use types::{Orientation, RoamError};
