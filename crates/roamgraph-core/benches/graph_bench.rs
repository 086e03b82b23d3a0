//! # Graph Benchmarks
//!
//! Performance benchmarks for roamgraph-core matrix and filter operations.
//!
//! Run with: `cargo bench -p roamgraph-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use roamgraph_core::{Graph, Node, Orientation};
use std::collections::BTreeSet;
use std::hint::black_box;

/// Create a chain of N notes, each linking to the next.
fn create_chain_graph(size: usize) -> Graph {
    let nodes = (0..size)
        .map(|i| {
            let links: BTreeSet<String> = if i + 1 < size {
                [format!("n{}", i + 1)].into_iter().collect()
            } else {
                BTreeSet::new()
            };
            let tags: BTreeSet<String> = if i % 3 == 0 {
                ["draft".to_string()].into_iter().collect()
            } else {
                BTreeSet::new()
            };
            Node::new(format!("n{i}.org"), format!("Note {i}"), format!("n{i}"), tags, links)
        })
        .collect();
    Graph::from_nodes(nodes).expect("graph")
}

/// Create a hub note linking to N-1 spokes.
fn create_star_graph(size: usize) -> Graph {
    let hub_links: BTreeSet<String> = (1..size).map(|i| format!("n{i}")).collect();
    let mut nodes = vec![Node::new("hub.org", "Hub", "n0", BTreeSet::new(), hub_links)];
    for i in 1..size {
        nodes.push(Node::new(
            format!("n{i}.org"),
            format!("Spoke {i}"),
            format!("n{i}"),
            BTreeSet::new(),
            BTreeSet::new(),
        ));
    }
    Graph::from_nodes(nodes).expect("graph")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_adjacency(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjacency_matrix");

    for size in [50, 200, 500].iter() {
        let graph = create_chain_graph(*size);
        group.bench_with_input(BenchmarkId::new("undirected", size), &graph, |b, g| {
            b.iter(|| black_box(g.adjacency_matrix(Orientation::Undirected)));
        });
        group.bench_with_input(BenchmarkId::new("forward", size), &graph, |b, g| {
            b.iter(|| black_box(g.adjacency_matrix(Orientation::Forward)));
        });
    }

    group.finish();
}

fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_matrix");

    for size in [50, 100, 200].iter() {
        let chain = create_chain_graph(*size);
        group.bench_with_input(BenchmarkId::new("chain", size), &chain, |b, g| {
            b.iter(|| black_box(g.distance_matrix(Orientation::Undirected)));
        });

        let star = create_star_graph(*size);
        group.bench_with_input(BenchmarkId::new("star", size), &star, |b, g| {
            b.iter(|| black_box(g.distance_matrix(Orientation::Forward)));
        });
    }

    group.finish();
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");
    let graph = create_chain_graph(1000);

    group.bench_function("exclude_tag", |b| {
        b.iter(|| black_box(graph.filter_tags(&["draft"], true, false)));
    });
    group.bench_function("exclude_regex", |b| {
        b.iter(|| black_box(graph.filter_tags(&["^dr"], true, true)));
    });
    group.bench_function("remove_orphans", |b| {
        b.iter(|| black_box(graph.remove_orphans()));
    });

    group.finish();
}

criterion_group!(benches, bench_adjacency, bench_distance, bench_filters);
criterion_main!(benches);
