//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! Every command loads the graph, applies the resolved filters, and writes
//! either a text report or a JSON document to the supplied writer.

use super::{Context, MatrixKind};
use crate::error::CliError;
use crate::source::open_source;
use roamgraph_core::{Graph, GraphStats, Orientation};
use std::io::Write;

// =============================================================================
// GRAPH LOADING
// =============================================================================

/// Load the graph named by `ctx` and apply its filters.
///
/// Tag filtering runs before orphan removal, so notes that lose all their
/// links to the tag filter are dropped as orphans too.
pub fn load_graph(ctx: &Context) -> Result<Graph, CliError> {
    let source = open_source(ctx.backend, &ctx.database);
    let mut graph = Graph::load(&*source)?;
    tracing::debug!(
        nodes = graph.len(),
        database = %ctx.database.display(),
        "graph loaded"
    );

    if !ctx.filter.tags.is_empty() {
        graph = graph.filter_tags(
            &ctx.filter.tags[..],
            ctx.filter.exclude,
            ctx.filter.regex,
        )?;
    }

    if ctx.filter.remove_orphans {
        graph = graph.remove_orphans();
    }

    Ok(graph)
}

fn write_json<W: Write>(out: &mut W, value: &serde_json::Value) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show graph summary.
pub fn cmd_status<W: Write>(ctx: &Context, out: &mut W) -> Result<(), CliError> {
    let graph = load_graph(ctx)?;
    let stats = GraphStats::from_graph(&graph);

    if ctx.json_mode {
        let output = serde_json::json!({
            "database": ctx.database.to_string_lossy(),
            "backend": ctx.backend,
            "node_count": stats.node_count,
            "edge_count": stats.edge_count,
            "orphan_count": stats.orphan_count,
            "tagged_count": stats.tagged_count,
            "distinct_tags": stats.distinct_tags,
            "dangling_links": stats.dangling_links,
            "density_per_thousand": stats.density_per_thousand(),
        });
        return write_json(out, &output);
    }

    writeln!(out, "Roam Graph Status")?;
    writeln!(out, "=================")?;
    writeln!(out, "Database: {}", ctx.database.display())?;
    writeln!(out, "Backend:  {:?}", ctx.backend)?;
    writeln!(out)?;
    writeln!(out, "Nodes:          {}", stats.node_count)?;
    writeln!(out, "Edges:          {}", stats.edge_count)?;
    writeln!(out, "Orphans:        {}", stats.orphan_count)?;
    writeln!(out, "Tagged:         {}", stats.tagged_count)?;
    writeln!(out, "Distinct Tags:  {}", stats.distinct_tags)?;
    writeln!(out, "Dangling Links: {}", stats.dangling_links)?;
    writeln!(
        out,
        "Density:        {} per thousand",
        stats.density_per_thousand()
    )?;

    Ok(())
}

// =============================================================================
// NODES COMMAND
// =============================================================================

/// List notes in graph order.
pub fn cmd_nodes<W: Write>(ctx: &Context, out: &mut W, full_path: bool) -> Result<(), CliError> {
    let graph = load_graph(ctx)?;
    let filenames = graph.filenames(!full_path);

    if ctx.json_mode {
        let nodes: Vec<serde_json::Value> = graph
            .nodes()
            .iter()
            .zip(&filenames)
            .map(|(node, file)| {
                serde_json::json!({
                    "id": node.id,
                    "title": node.title,
                    "file": file,
                    "tags": node.tags,
                })
            })
            .collect();
        return write_json(out, &serde_json::json!({ "nodes": nodes }));
    }

    for (node, file) in graph.nodes().iter().zip(&filenames) {
        let tags: Vec<&str> = node.tags.iter().map(String::as_str).collect();
        writeln!(out, "{}\t{}\t{}\t{}", node.id, node.title, file, tags.join(","))?;
    }
    Ok(())
}

// =============================================================================
// LINKS COMMAND
// =============================================================================

/// List each note's title with the titles it links to.
pub fn cmd_links<W: Write>(ctx: &Context, out: &mut W) -> Result<(), CliError> {
    let graph = load_graph(ctx)?;
    let links = graph.links();

    if ctx.json_mode {
        let entries: Vec<serde_json::Value> = links
            .iter()
            .map(|(title, targets)| serde_json::json!({ "title": title, "links_to": targets }))
            .collect();
        return write_json(out, &serde_json::json!({ "links": entries }));
    }

    for (title, targets) in &links {
        writeln!(out, "{} -> [{}]", title, targets.join(", "))?;
    }
    Ok(())
}

// =============================================================================
// ORPHANS COMMAND
// =============================================================================

/// List orphan notes.
pub fn cmd_orphans<W: Write>(ctx: &Context, out: &mut W) -> Result<(), CliError> {
    let graph = load_graph(ctx)?;
    let orphans = graph.orphans();

    if ctx.json_mode {
        let entries: Vec<serde_json::Value> = orphans
            .iter()
            .map(|node| serde_json::json!({ "id": node.id, "title": node.title }))
            .collect();
        return write_json(out, &serde_json::json!({ "orphans": entries }));
    }

    if orphans.is_empty() {
        writeln!(out, "No orphans.")?;
        return Ok(());
    }
    for node in orphans {
        writeln!(out, "{}\t{}", node.id, node.title)?;
    }
    Ok(())
}

// =============================================================================
// MATRIX COMMAND
// =============================================================================

/// Emit an adjacency or distance matrix.
///
/// Output is always JSON; unreachable cells are `null`. Rows and columns
/// follow `ids`.
pub fn cmd_matrix<W: Write>(
    ctx: &Context,
    out: &mut W,
    kind: MatrixKind,
    directed: bool,
    reverse: bool,
) -> Result<(), CliError> {
    let graph = load_graph(ctx)?;
    let orientation = Orientation::from_flags(directed, reverse);

    let (name, matrix) = match kind {
        MatrixKind::Adjacency => ("adjacency", graph.adjacency_matrix(orientation)),
        MatrixKind::Distance => ("distance", graph.distance_matrix(orientation)?),
    };

    let output = serde_json::json!({
        "ids": graph.ids(),
        "kind": name,
        "orientation": orientation,
        "matrix": matrix,
    });
    write_json(out, &output)
}
