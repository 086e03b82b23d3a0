//! # Matrix Primitives
//!
//! Fixed weights used by every matrix the graph builds.
//!
//! Edges carry no weight beyond presence or absence, so a matrix cell is one
//! of exactly three values.

/// Weight of a present edge.
pub const LINK_WEIGHT: f64 = 1.0;

/// Sentinel for "no direct edge" in adjacency input and "unreachable" in
/// distance output.
pub const NO_EDGE: f64 = f64::INFINITY;

/// Distance from a note to itself. Adjacency diagonals are left at this value.
pub const SELF_DISTANCE: f64 = 0.0;

/// Character org-roam wraps around every stored string value.
pub const QUOTE: char = '"';
