//! # roamgraph
//!
//! Command-line front end for `roamgraph-core`.
//!
//! Exposed as a library so the command layer can be driven from tests with
//! an in-memory writer.

pub mod cli;
pub mod config;
pub mod error;
pub mod source;

pub use error::CliError;
