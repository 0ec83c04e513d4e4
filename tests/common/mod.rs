//! Graph building utilities for integration scenarios

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trellis::{GeographicNetwork, GraphOps, SocialGraph, VertexId, Weight};

/// Install a fmt subscriber for test diagnostics; repeat calls are harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Directed cycle 1 → 2 → … → n → 1
pub fn follow_cycle(n: u64) -> SocialGraph {
    let mut graph = SocialGraph::new();
    for id in 1..=n {
        graph.add_vertex(id);
    }
    for id in 1..=n {
        graph.add_edge(id, id % n + 1, 1);
    }
    graph
}

/// Directed random graph with `edges` distinct follow edges
pub fn random_social(vertices: u64, edges: usize, seed: u64) -> SocialGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = SocialGraph::new();
    for id in 1..=vertices {
        graph.add_vertex(id);
    }
    let mut added = 0;
    while added < edges {
        let from = rng.gen_range(1..=vertices);
        let to = rng.gen_range(1..=vertices);
        if from != to && !graph.has_edge(from, to) {
            graph.add_edge(from, to, 1);
            added += 1;
        }
    }
    graph
}

/// Undirected chain 1-2-…-n with the given edge weights
pub fn weighted_chain(weights: &[Weight]) -> GeographicNetwork {
    let mut graph = GeographicNetwork::new();
    for id in 1..=(weights.len() as u64 + 1) {
        graph.add_vertex(id);
    }
    for (i, &w) in weights.iter().enumerate() {
        graph.add_edge(i as u64 + 1, i as u64 + 2, w);
    }
    graph
}

/// Two unit-weight triangles (1,2,3) and (4,5,6) joined by the bridge 3-4
pub fn bridged_triangles() -> GeographicNetwork {
    let mut graph = GeographicNetwork::new();
    for id in 1..=6 {
        graph.add_vertex(id);
    }
    for (a, b) in [(1, 2), (2, 3), (1, 3), (4, 5), (5, 6), (4, 6)] {
        graph.add_edge(a, b, 1);
    }
    graph.add_edge(3, 4, 1);
    graph
}

/// Random connected components of the given sizes, ids assigned sequentially
/// from 1. Each component is a random spanning tree plus a few chords.
pub fn random_components(sizes: &[u64], seed: u64) -> GeographicNetwork {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = GeographicNetwork::new();
    let mut next_id: VertexId = 1;
    for &size in sizes {
        let first = next_id;
        for offset in 0..size {
            graph.add_vertex(first + offset);
        }
        // Spanning tree: attach each new vertex to a random earlier one.
        for offset in 1..size {
            let attach = rng.gen_range(first..first + offset);
            graph.add_edge(first + offset, attach, rng.gen_range(1..100));
        }
        // A few chords; duplicates and self-edges are no-ops.
        for _ in 0..size / 2 {
            let a = rng.gen_range(first..first + size);
            let b = rng.gen_range(first..first + size);
            graph.add_edge(a, b, rng.gen_range(1..100));
        }
        next_id += size;
    }
    graph
}

/// Assert that every consecutive pair in `path` is a real edge
pub fn assert_path_edges(graph: &dyn GraphOps, path: &[VertexId]) {
    for pair in path.windows(2) {
        assert!(
            graph.has_edge(pair[0], pair[1]),
            "path step {} -> {} is not an edge",
            pair[0],
            pair[1]
        );
    }
}
