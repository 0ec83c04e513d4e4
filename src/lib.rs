//! Trellis: Graph Analytics Engine
//!
//! An in-memory graph analytics engine offering three specialized graph
//! variants over a common capability set, plus a battery of classical
//! graph algorithms.
//!
//! # Core Concepts
//!
//! - **SocialGraph**: directed follow graph with BFS shortest paths, mutual-edge
//!   detection, PageRank influence scores, and Kosaraju community detection
//! - **GeographicNetwork**: undirected weighted network with Dijkstra routing,
//!   Kruskal spanning forests, Tarjan articulation points, and minimax-effort paths
//! - **InteractionGraph**: bipartite user/post graph with Jaccard similarity,
//!   collaborative filtering, trend scoring, and Kahn topological ordering
//!
//! The two non-bipartite variants implement the [`GraphOps`] capability set;
//! callers can hold either behind the abstraction and never need to know the
//! concrete variant.
//!
//! # Example
//!
//! ```
//! use trellis::{GraphOps, SocialGraph};
//!
//! let mut graph = SocialGraph::new();
//! graph.add_vertex(1);
//! graph.add_vertex(2);
//! graph.add_edge(1, 2, 1);
//! assert_eq!(graph.find_shortest_path(1, 2), Some(vec![1, 2]));
//! ```

mod graph;

pub use graph::{
    GeographicNetwork, GraphOps, Interaction, InteractionGraph, MstEdge, NodeType, SocialGraph,
    TrellisEngine, TrellisError, TrellisResult, VertexId, Weight,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
