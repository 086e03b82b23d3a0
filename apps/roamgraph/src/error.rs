//! # CLI Errors

use roamgraph_core::RoamError;
use thiserror::Error;

/// Errors surfaced by the command layer.
#[derive(Debug, Error)]
pub enum CliError {
    /// An error from the graph engine or its ingestion sources.
    #[error(transparent)]
    Core(#[from] RoamError),

    /// The configuration file or flag combination is unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing command output failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Encoding command output failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
