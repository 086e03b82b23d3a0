//! # Configuration
//!
//! Optional TOML file layered under the command-line flags.
//!
//! ```toml
//! [source]
//! database = "~/.emacs.d/org-roam.db"
//! backend = "sqlite"
//!
//! [filter]
//! exclude_tags = ["draft", "private"]
//! regex = false
//! remove_orphans = true
//! ```
//!
//! Precedence: flag > file > built-in default.

use crate::error::CliError;
use crate::source::Backend;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "roamgraph.toml";

/// Database used when neither a flag nor the config file names one.
pub const DEFAULT_DATABASE: &str = "~/.emacs.d/org-roam.db";

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the notes come from.
    pub source: SourceConfig,
    /// Filters applied to every command.
    pub filter: FilterConfig,
}

/// `[source]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Path of the database or rows file. `~` is expanded.
    pub database: Option<String>,
    /// Storage backend.
    pub backend: Option<Backend>,
}

/// `[filter]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Tags whose notes are dropped unless the command line names its own tags.
    pub exclude_tags: Vec<String>,
    /// Treat `exclude_tags` as regular expressions.
    pub regex: bool,
    /// Drop orphan notes.
    pub remove_orphans: bool,
}

impl Config {
    /// Parse a config document.
    pub fn parse(text: &str) -> Result<Self, CliError> {
        toml::from_str(text).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Load the config file.
    ///
    /// An explicit `path` must exist. Without one, `roamgraph.toml` in the
    /// working directory is used if present, and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                return Err(CliError::Config(format!(
                    "config file '{}' not found",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path).map_err(|e| {
            CliError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::parse(&text)
    }
}

/// Expand a leading `~` to the home directory.
#[must_use]
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}
