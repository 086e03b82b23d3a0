//! # org-roam Database Source
//!
//! Reads note rows from an org-roam SQLite database.
//!
//! org-roam stores every string value wrapped in double quotes. Values are
//! unquoted on the way out so ids in `links.dest` compare equal to ids in
//! `nodes.id`.

use super::{NoteRows, NoteSource, unquote};
use crate::RoamError;
use rusqlite::{Connection, OpenFlags};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

const NODES_QUERY: &str = "SELECT id, file, title FROM nodes ORDER BY id ASC;";
const TAGS_QUERY: &str = "SELECT node_id, tag FROM tags;";
const LINKS_QUERY: &str = "SELECT source, dest FROM links;";

fn ingest_err(e: rusqlite::Error) -> RoamError {
    RoamError::Ingestion(e.to_string())
}

/// Handle to an org-roam database file.
///
/// Holds only the path. Each `fetch_rows` call opens its own read-only
/// connection, which is dropped before the call returns on every path.
#[derive(Debug, Clone)]
pub struct RoamDb {
    path: PathBuf,
}

impl RoamDb {
    /// Create a handle for the database at `path`. Nothing is opened yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection, RoamError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Connection::open_with_flags(&self.path, flags).map_err(|e| {
            RoamError::Ingestion(format!("cannot open '{}': {}", self.path.display(), e))
        })
    }

    fn read_rows(&self) -> Result<NoteRows, RoamError> {
        let conn = self.open()?;

        let nodes = {
            let mut stmt = conn.prepare(NODES_QUERY).map_err(ingest_err)?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                    ))
                })
                .map_err(ingest_err)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(ingest_err)?
        };

        let mut tags = read_pairs(&conn, TAGS_QUERY)?;
        let mut links = read_pairs(&conn, LINKS_QUERY)?;

        let mut out = NoteRows::new();
        for (id, file, title) in nodes {
            let id = unquote(&id);
            let node_tags = tags.remove(&id).unwrap_or_default();
            let node_links = links.remove(&id).unwrap_or_default();
            out.push(
                unquote(&file),
                title.as_deref().map(unquote).unwrap_or_default(),
                id,
                node_tags,
                node_links,
            );
        }

        tracing::debug!(
            path = %self.path.display(),
            notes = out.ids.len(),
            "read org-roam rows"
        );
        Ok(out)
    }
}

/// Group `(key, value)` rows into unquoted per-key sets.
fn read_pairs(
    conn: &Connection,
    sql: &str,
) -> Result<BTreeMap<String, BTreeSet<String>>, RoamError> {
    let mut stmt = conn.prepare(sql).map_err(ingest_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })
        .map_err(ingest_err)?;

    let mut grouped: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for row in rows {
        let (key, value) = row.map_err(ingest_err)?;
        if let Some(value) = value {
            grouped
                .entry(unquote(&key))
                .or_default()
                .insert(unquote(&value));
        }
    }
    Ok(grouped)
}

impl NoteSource for RoamDb {
    fn fetch_rows(&self) -> Result<NoteRows, RoamError> {
        self.read_rows().inspect_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "org-roam ingestion failed");
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
