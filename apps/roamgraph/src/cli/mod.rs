//! # roamgraph CLI Module
//!
//! This module implements the CLI interface for roamgraph.
//!
//! ## Available Commands
//!
//! - `status` - Summary counts for the (filtered) graph
//! - `nodes` - List notes with id, title, file and tags
//! - `links` - List each note's title with the titles it links to
//! - `orphans` - List notes with no inbound and no outbound links
//! - `matrix` - Emit an adjacency or distance matrix as JSON

mod commands;

use crate::config::{Config, DEFAULT_DATABASE, expand_path};
use crate::error::CliError;
use crate::source::Backend;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// roamgraph - inspect a linked-notes knowledge base as a graph
#[derive(Parser, Debug)]
#[command(name = "roamgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the org-roam database or JSON rows file
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Storage backend holding the notes
    #[arg(short = 'B', long, global = true, value_enum)]
    pub backend: Option<Backend>,

    /// Path to a TOML config file (default: ./roamgraph.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subgraph selection shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Tag (or pattern with --regex) to filter by; repeatable
    #[arg(short = 't', long = "tag", global = true)]
    pub tags: Vec<String>,

    /// Keep only notes carrying a tag instead of dropping them
    #[arg(long, global = true)]
    pub include: bool,

    /// Treat tags as regular expressions (unanchored)
    #[arg(long, global = true)]
    pub regex: bool,

    /// Drop orphan notes after tag filtering
    #[arg(long, global = true)]
    pub no_orphans: bool,
}

/// Which matrix the `matrix` command emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatrixKind {
    /// 1 for a link, infinity (null) otherwise.
    Adjacency,
    /// All-pairs shortest-path lengths.
    Distance,
}

/// Available CLI commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show graph summary
    Status,

    /// List notes
    Nodes {
        /// Print full file paths instead of base names
        #[arg(long)]
        full_path: bool,
    },

    /// List outbound links by title
    Links,

    /// List orphan notes
    Orphans,

    /// Emit a matrix as JSON
    Matrix {
        /// Matrix to compute
        #[arg(short, long, value_enum, default_value_t = MatrixKind::Adjacency)]
        kind: MatrixKind,

        /// Respect link direction
        #[arg(long)]
        directed: bool,

        /// Reverse link direction (directed only)
        #[arg(long)]
        reverse: bool,
    },
}

// =============================================================================
// RESOLVED CONTEXT
// =============================================================================

/// Filter settings after merging flags and config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPlan {
    /// Tags or patterns; empty means no tag filter.
    pub tags: Vec<String>,
    /// Drop matching notes (true) or keep only them (false).
    pub exclude: bool,
    /// Compile tags as regular expressions.
    pub regex: bool,
    /// Remove orphans after tag filtering.
    pub remove_orphans: bool,
}

/// Everything a command needs, with flags layered over the config file.
#[derive(Debug, Clone)]
pub struct Context {
    /// Resolved database path.
    pub database: PathBuf,
    /// Resolved backend.
    pub backend: Backend,
    /// JSON output requested.
    pub json_mode: bool,
    /// Resolved filters.
    pub filter: FilterPlan,
}

impl Context {
    /// Merge command-line flags over the config file.
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self, CliError> {
        let database = match (&cli.database, &config.source.database) {
            (Some(path), _) => path.clone(),
            (None, Some(raw)) => expand_path(raw),
            (None, None) => expand_path(DEFAULT_DATABASE),
        };
        let backend = cli.backend.or(config.source.backend).unwrap_or_default();

        let filter = if cli.filter.tags.is_empty() {
            if cli.filter.include {
                return Err(CliError::Config(
                    "--include needs at least one --tag".to_string(),
                ));
            }
            FilterPlan {
                tags: config.filter.exclude_tags.clone(),
                exclude: true,
                regex: cli.filter.regex || config.filter.regex,
                remove_orphans: cli.filter.no_orphans || config.filter.remove_orphans,
            }
        } else {
            FilterPlan {
                tags: cli.filter.tags.clone(),
                exclude: !cli.filter.include,
                regex: cli.filter.regex,
                remove_orphans: cli.filter.no_orphans || config.filter.remove_orphans,
            }
        };

        Ok(Self {
            database,
            backend,
            json_mode: cli.json_mode,
            filter,
        })
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments, writing command output to `out`.
pub fn execute<W: Write>(cli: Cli, out: &mut W) -> Result<(), CliError> {
    let config = Config::load(cli.config.as_deref())?;
    let ctx = Context::resolve(&cli, &config)?;

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => cmd_status(&ctx, out),
        Commands::Nodes { full_path } => cmd_nodes(&ctx, out, full_path),
        Commands::Links => cmd_links(&ctx, out),
        Commands::Orphans => cmd_orphans(&ctx, out),
        Commands::Matrix {
            kind,
            directed,
            reverse,
        } => cmd_matrix(&ctx, out, kind, directed, reverse),
    }
}
