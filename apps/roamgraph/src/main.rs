//! # roamgraph
//!
//! Command-line front end for `roamgraph-core`.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │           apps/roamgraph (THE BINARY)      │
//! │                                            │
//! │   CLI (clap) ──► config (toml) ──► source  │
//! │                                   │        │
//! │                                   ▼        │
//! │                          ┌────────────────┐│
//! │                          │ roamgraph-core ││
//! │                          │   (THE LOGIC)  ││
//! │                          └────────────────┘│
//! └────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! roamgraph status
//! roamgraph -t draft --no-orphans nodes
//! roamgraph -D notes.json -B json matrix -k distance --directed
//! ```

use clap::Parser;
use roamgraph::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // ROAMGRAPH_LOG_FORMAT=json enables machine-parseable logs on stderr.
    let log_format = std::env::var("ROAMGRAPH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "roamgraph=debug,roamgraph_core=debug"
    } else {
        "roamgraph=info,roamgraph_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = cli::execute(cli, &mut out) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
