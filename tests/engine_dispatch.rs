//! Scenario tests for the engine registry: runtime dispatch over the
//! capability set without knowing the concrete graph variant.

mod common;

use common::init_tracing;
use trellis::{GeographicNetwork, GraphOps, SocialGraph, TrellisEngine, TrellisError};

/// Build any capability-set graph through the abstraction alone.
fn build_chain(graph: &mut dyn GraphOps, n: u64, weight: i64) {
    for id in 1..=n {
        graph.add_vertex(id);
    }
    for id in 1..n {
        graph.add_edge(id, id + 1, weight);
    }
}

#[test]
fn same_calls_dispatch_to_divergent_algorithms() {
    init_tracing();
    let engine = TrellisEngine::new();
    engine.insert("follows", Box::new(SocialGraph::new()));
    engine.insert("latency", Box::new(GeographicNetwork::new()));

    for name in ["follows", "latency"] {
        engine.update(name, |g| build_chain(g, 4, 2)).unwrap();
    }

    // Identical chain, identical query; BFS and Dijkstra agree here.
    for name in ["follows", "latency"] {
        let path = engine
            .read(name, |g| g.find_shortest_path(1, 4))
            .unwrap()
            .expect("chain is connected");
        assert_eq!(path, vec![1, 2, 3, 4]);
    }

    // Direction is where the variants diverge: the social chain is one-way,
    // the geographic chain is symmetric.
    assert_eq!(
        engine.read("follows", |g| g.find_shortest_path(4, 1)).unwrap(),
        None
    );
    assert_eq!(
        engine.read("latency", |g| g.find_shortest_path(4, 1)).unwrap(),
        Some(vec![4, 3, 2, 1])
    );
}

#[test]
fn registry_isolates_graph_instances() {
    let engine = TrellisEngine::new();
    engine.insert("a", Box::new(SocialGraph::new()));
    engine.insert("b", Box::new(SocialGraph::new()));

    engine.update("a", |g| g.add_vertex(1)).unwrap();
    assert_eq!(engine.read("a", |g| g.vertex_count()).unwrap(), 1);
    assert_eq!(engine.read("b", |g| g.vertex_count()).unwrap(), 0);
}

#[test]
fn missing_graph_surfaces_a_typed_error() {
    let engine = TrellisEngine::new();
    let err = engine.read("nope", |g| g.vertex_count()).unwrap_err();
    assert!(matches!(err, TrellisError::GraphNotFound(_)));
    assert_eq!(err.to_string(), "Graph not found: nope");
}

#[test]
fn ownership_moves_into_and_out_of_the_registry() {
    let mut graph = SocialGraph::new();
    graph.add_vertex(1);

    let engine = TrellisEngine::new();
    // The graph moves into the registry; no copy is ever made.
    engine.insert("follows", Box::new(graph));
    assert_eq!(engine.read("follows", |g| g.vertex_count()).unwrap(), 1);

    assert!(engine.remove("follows"));
    assert!(!engine.contains("follows"));
}
