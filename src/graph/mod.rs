//! Core graph data structures and the shared capability set

mod engine;
mod geo;
mod interaction;
mod social;


pub use engine::{TrellisEngine, TrellisError, TrellisResult};
pub use geo::{GeographicNetwork, MstEdge};
pub use interaction::{Interaction, InteractionGraph, NodeType};
pub use social::SocialGraph;

/// Caller-supplied vertex identifier.
///
/// The engine neither generates nor interprets identifiers; it only enforces
/// uniqueness within a single graph instance.
pub type VertexId = u64;

/// Caller-supplied edge weight.
///
/// All documented algorithms assume positive weights; behavior under zero or
/// negative weights is unspecified.
pub type Weight = i64;

/// The capability set shared by the non-bipartite graph variants.
///
/// [`SocialGraph`] and [`GeographicNetwork`] both satisfy this contract but
/// diverge entirely in shortest-path algorithm (BFS vs. Dijkstra) and in
/// their specialized analyses. Callers that only need the capability set can
/// hold either variant as `&dyn GraphOps` or `Box<dyn GraphOps>`.
///
/// Mutations referencing an absent vertex are silent no-ops, and adding an
/// existing vertex or edge is idempotent. Queries on absent vertices return
/// an empty or false result, never an error.
pub trait GraphOps: std::fmt::Debug {
    /// Add a vertex. Re-adding an existing vertex is a no-op.
    fn add_vertex(&mut self, id: VertexId);

    /// Remove a vertex and every edge incident to it.
    fn remove_vertex(&mut self, id: VertexId);

    /// Add an edge. No-op unless both endpoints exist; re-adding an
    /// existing edge leaves the stored weight unchanged.
    fn add_edge(&mut self, from: VertexId, to: VertexId, weight: Weight);

    /// Remove an edge. Absent edge or endpoints: no-op.
    fn remove_edge(&mut self, from: VertexId, to: VertexId);

    /// Whether an edge from `from` to `to` exists.
    fn has_edge(&self, from: VertexId, to: VertexId) -> bool;

    /// The vertices adjacent to `from`. Order carries no meaning; callers
    /// must treat the result as a set. Absent vertex: empty.
    fn adjacent(&self, from: VertexId) -> Vec<VertexId>;

    /// The shortest path from `start` to `end`, both endpoints inclusive.
    ///
    /// A path to self is the single-element sequence `[start]`. Absent
    /// endpoints or no connecting path yield `None`.
    fn find_shortest_path(&self, start: VertexId, end: VertexId) -> Option<Vec<VertexId>>;

    /// Whether the vertex exists in this graph.
    fn contains_vertex(&self, id: VertexId) -> bool;

    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of edges (undirected edges counted once).
    fn edge_count(&self) -> usize;

    /// All vertex identifiers, in ascending order.
    fn vertices(&self) -> Vec<VertexId>;
}
