//! GeographicNetwork: an undirected weighted network with resilience analytics

use super::{GraphOps, VertexId, Weight};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use tracing::debug;

const INF: Weight = Weight::MAX;

/// A weighted adjacency entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct GeoEdge {
    to: VertexId,
    weight: Weight,
}

/// An edge selected into a minimum spanning tree or forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MstEdge {
    pub u: VertexId,
    pub v: VertexId,
    pub weight: Weight,
}

/// An undirected, weighted graph of locations and link costs.
///
/// Edges are stored symmetrically: inserting (u, v) creates adjacency entries
/// on both u and v, and removal cleans up both sides. Weights model link
/// latency or cost and are assumed positive.
///
/// Move-only, like [`SocialGraph`](super::SocialGraph): no `Clone`, so
/// adjacency storage is never silently duplicated.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeographicNetwork {
    adjacency: HashMap<VertexId, Vec<GeoEdge>>,
}

/// Min-heap entry for the Dijkstra-style searches.
///
/// `BinaryHeap` is a max-heap, so the ordering is reversed; ties on distance
/// break toward the smaller index to keep route selection deterministic.
#[derive(Debug, PartialEq, Eq)]
struct FrontierEntry {
    dist: Weight,
    idx: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .cmp(&self.dist)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Union-Find with path halving and union by rank, used by Kruskal
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Returns false if x and y were already in the same set
    fn union(&mut self, x: usize, y: usize) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return false;
        }
        if self.rank[rx] < self.rank[ry] {
            self.parent[rx] = ry;
        } else if self.rank[rx] > self.rank[ry] {
            self.parent[ry] = rx;
        } else {
            self.parent[ry] = rx;
            self.rank[rx] += 1;
        }
        true
    }
}

impl GeographicNetwork {
    /// Create an empty network
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum spanning tree via Kruskal's algorithm.
    ///
    /// For a connected graph of n vertices the result is exactly n−1 edges
    /// summing to the minimum possible total weight. A disconnected graph
    /// yields a spanning forest: one tree per component, n−k edges in total.
    /// A single-vertex or empty graph yields an empty edge list.
    pub fn minimum_spanning_tree(&self) -> Vec<MstEdge> {
        let (ids, index, _) = self.indexed();
        let n = ids.len();

        // Each undirected edge appears in both adjacency lists; keep the
        // (smaller, larger) orientation once.
        let mut edges: Vec<(Weight, usize, usize)> = Vec::new();
        for (u, id) in ids.iter().enumerate() {
            for entry in &self.adjacency[id] {
                if let Some(&v) = index.get(&entry.to) {
                    if u < v {
                        edges.push((entry.weight, u, v));
                    }
                }
            }
        }
        edges.sort_unstable();

        let mut forest = UnionFind::new(n);
        let mut tree = Vec::new();
        for (weight, u, v) in edges {
            if forest.union(u, v) {
                tree.push(MstEdge {
                    u: ids[u],
                    v: ids[v],
                    weight,
                });
                if tree.len() + 1 == n {
                    break;
                }
            }
        }
        debug!(edges = tree.len(), vertices = n, "spanning forest built");
        tree
    }

    /// Articulation points via Tarjan's algorithm.
    ///
    /// Runs an iterative DFS carrying (vertex, parent, child-cursor) frames
    /// on an explicit stack. A non-root vertex u is critical when some DFS
    /// child's low-link reaches no higher than u's discovery time; a root is
    /// critical when it has more than one DFS child. Result in ascending
    /// vertex order.
    pub fn find_critical_nodes(&self) -> Vec<VertexId> {
        let (ids, _, adj) = self.indexed();
        let n = ids.len();

        let mut disc = vec![usize::MAX; n];
        let mut low = vec![0usize; n];
        let mut is_cut = vec![false; n];
        let mut timer = 0usize;

        for root in 0..n {
            if disc[root] != usize::MAX {
                continue;
            }
            disc[root] = timer;
            low[root] = timer;
            timer += 1;
            let mut root_children = 0usize;

            // Frame: (vertex, DFS parent, next-neighbor cursor)
            let mut stack: Vec<(usize, usize, usize)> = vec![(root, usize::MAX, 0)];
            while let Some((v, parent, cursor)) = stack.last_mut() {
                let (v, parent) = (*v, *parent);
                if *cursor < adj[v].len() {
                    let w = adj[v][*cursor];
                    *cursor += 1;
                    if disc[w] == usize::MAX {
                        disc[w] = timer;
                        low[w] = timer;
                        timer += 1;
                        if v == root {
                            root_children += 1;
                        }
                        stack.push((w, v, 0));
                    } else if w != parent {
                        low[v] = low[v].min(disc[w]);
                    }
                } else {
                    stack.pop();
                    if parent != usize::MAX {
                        low[parent] = low[parent].min(low[v]);
                        if parent != root && low[v] >= disc[parent] {
                            is_cut[parent] = true;
                        }
                    }
                }
            }

            if root_children > 1 {
                is_cut[root] = true;
            }
        }

        ids.into_iter()
            .enumerate()
            .filter(|&(i, _)| is_cut[i])
            .map(|(_, id)| id)
            .collect()
    }

    /// Path minimizing the maximum single edge weight ("effort").
    ///
    /// A Dijkstra-style relaxation where the distance to a vertex is the
    /// minimum achievable maximum-edge-weight over any path reaching it.
    /// This can pick a different route than the min-sum
    /// [`find_shortest_path`](GraphOps::find_shortest_path) on the same
    /// graph. Same absence and self-path semantics as the shortest path.
    pub fn find_path_with_min_effort(
        &self,
        start: VertexId,
        end: VertexId,
    ) -> Option<Vec<VertexId>> {
        self.relaxation_search(start, end, |dist, weight| dist.max(weight))
    }

    /// The vertex with the fewest *other* vertices reachable within
    /// `distance_threshold` cumulative path weight.
    ///
    /// Computed over Floyd–Warshall all-pairs shortest distances. Ties break
    /// toward the largest vertex id; an empty graph yields `None`.
    pub fn find_best_city(&self, distance_threshold: Weight) -> Option<VertexId> {
        let (ids, index, _) = self.indexed();
        let n = ids.len();
        if n == 0 {
            return None;
        }

        let mut dist = vec![vec![INF; n]; n];
        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = 0;
        }
        for (u, id) in ids.iter().enumerate() {
            for entry in &self.adjacency[id] {
                if let Some(&v) = index.get(&entry.to) {
                    if entry.weight < dist[u][v] {
                        dist[u][v] = entry.weight;
                    }
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                if dist[i][k] == INF {
                    continue;
                }
                for j in 0..n {
                    if dist[k][j] == INF {
                        continue;
                    }
                    let via = dist[i][k].saturating_add(dist[k][j]);
                    if via < dist[i][j] {
                        dist[i][j] = via;
                    }
                }
            }
        }

        let mut best: Option<(usize, VertexId)> = None;
        for (i, &id) in ids.iter().enumerate() {
            let reachable = (0..n)
                .filter(|&j| j != i && dist[i][j] <= distance_threshold)
                .count();
            // <= keeps the larger id on ties (ids ascend).
            match best {
                Some((count, _)) if reachable > count => {}
                _ => best = Some((reachable, id)),
            }
        }
        best.map(|(_, id)| id)
    }

    /// Shared Dijkstra machinery for the min-sum and minimax searches.
    ///
    /// `relax` combines the distance settled at a vertex with an outgoing
    /// edge weight: saturating addition gives min-sum routing, `max` gives
    /// minimax effort.
    fn relaxation_search(
        &self,
        start: VertexId,
        end: VertexId,
        relax: impl Fn(Weight, Weight) -> Weight,
    ) -> Option<Vec<VertexId>> {
        if !self.adjacency.contains_key(&start) || !self.adjacency.contains_key(&end) {
            return None;
        }
        if start == end {
            return Some(vec![start]);
        }

        let (ids, index, adj_entries) = self.indexed_with_weights();
        let n = ids.len();
        let start_idx = index[&start];
        let end_idx = index[&end];

        let mut dist = vec![INF; n];
        let mut came_from = vec![usize::MAX; n];
        let mut settled = vec![false; n];
        let mut frontier = BinaryHeap::new();

        dist[start_idx] = 0;
        frontier.push(FrontierEntry {
            dist: 0,
            idx: start_idx,
        });

        while let Some(FrontierEntry { idx, .. }) = frontier.pop() {
            if settled[idx] {
                continue;
            }
            settled[idx] = true;
            if idx == end_idx {
                break;
            }

            for &(w, weight) in &adj_entries[idx] {
                if settled[w] {
                    continue;
                }
                let candidate = relax(dist[idx], weight);
                if candidate < dist[w] {
                    dist[w] = candidate;
                    came_from[w] = idx;
                    frontier.push(FrontierEntry {
                        dist: candidate,
                        idx: w,
                    });
                }
            }
        }

        if dist[end_idx] == INF {
            return None;
        }

        let mut path = Vec::new();
        let mut current = end_idx;
        while current != usize::MAX {
            path.push(ids[current]);
            current = came_from[current];
        }
        path.reverse();
        Some(path)
    }

    /// Ascending vertex ids, the id → index map, and index-based adjacency
    fn indexed(&self) -> (Vec<VertexId>, HashMap<VertexId, usize>, Vec<Vec<usize>>) {
        let mut ids: Vec<VertexId> = self.adjacency.keys().copied().collect();
        ids.sort_unstable();
        let index: HashMap<VertexId, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let adj: Vec<Vec<usize>> = ids
            .iter()
            .map(|id| {
                self.adjacency[id]
                    .iter()
                    .filter_map(|e| index.get(&e.to).copied())
                    .collect()
            })
            .collect();
        (ids, index, adj)
    }

    /// As [`indexed`](Self::indexed), retaining edge weights
    fn indexed_with_weights(
        &self,
    ) -> (
        Vec<VertexId>,
        HashMap<VertexId, usize>,
        Vec<Vec<(usize, Weight)>>,
    ) {
        let mut ids: Vec<VertexId> = self.adjacency.keys().copied().collect();
        ids.sort_unstable();
        let index: HashMap<VertexId, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let adj: Vec<Vec<(usize, Weight)>> = ids
            .iter()
            .map(|id| {
                self.adjacency[id]
                    .iter()
                    .filter_map(|e| index.get(&e.to).map(|&j| (j, e.weight)))
                    .collect()
            })
            .collect();
        (ids, index, adj)
    }
}

impl GraphOps for GeographicNetwork {
    fn add_vertex(&mut self, id: VertexId) {
        self.adjacency.entry(id).or_default();
    }

    fn remove_vertex(&mut self, id: VertexId) {
        if self.adjacency.remove(&id).is_some() {
            for entries in self.adjacency.values_mut() {
                entries.retain(|e| e.to != id);
            }
        }
    }

    fn add_edge(&mut self, from: VertexId, to: VertexId, weight: Weight) {
        if from == to
            || !self.adjacency.contains_key(&from)
            || !self.adjacency.contains_key(&to)
            || self.has_edge(from, to)
        {
            return;
        }
        // Symmetric storage: one entry on each endpoint.
        if let Some(entries) = self.adjacency.get_mut(&from) {
            entries.push(GeoEdge { to, weight });
        }
        if let Some(entries) = self.adjacency.get_mut(&to) {
            entries.push(GeoEdge { to: from, weight });
        }
    }

    fn remove_edge(&mut self, from: VertexId, to: VertexId) {
        if let Some(entries) = self.adjacency.get_mut(&from) {
            entries.retain(|e| e.to != to);
        }
        if let Some(entries) = self.adjacency.get_mut(&to) {
            entries.retain(|e| e.to != from);
        }
    }

    fn has_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.adjacency
            .get(&from)
            .map_or(false, |entries| entries.iter().any(|e| e.to == to))
    }

    fn adjacent(&self, from: VertexId) -> Vec<VertexId> {
        self.adjacency
            .get(&from)
            .map(|entries| entries.iter().map(|e| e.to).collect())
            .unwrap_or_default()
    }

    /// Dijkstra over positive weights for the minimal-total-weight path
    fn find_shortest_path(&self, start: VertexId, end: VertexId) -> Option<Vec<VertexId>> {
        self.relaxation_search(start, end, |dist, weight| dist.saturating_add(weight))
    }

    fn contains_vertex(&self, id: VertexId) -> bool {
        self.adjacency.contains_key(&id)
    }

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    fn vertices(&self) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self.adjacency.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted_chain(weights: &[Weight]) -> GeographicNetwork {
        let mut graph = GeographicNetwork::new();
        for id in 1..=(weights.len() as u64 + 1) {
            graph.add_vertex(id);
        }
        for (i, &w) in weights.iter().enumerate() {
            graph.add_edge(i as u64 + 1, i as u64 + 2, w);
        }
        graph
    }

    fn triangle(a: VertexId, b: VertexId, c: VertexId, graph: &mut GeographicNetwork) {
        for id in [a, b, c] {
            graph.add_vertex(id);
        }
        graph.add_edge(a, b, 1);
        graph.add_edge(b, c, 1);
        graph.add_edge(a, c, 1);
    }

    #[test]
    fn edges_are_symmetric() {
        let graph = weighted_chain(&[5]);
        assert!(graph.has_edge(1, 2));
        assert!(graph.has_edge(2, 1));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn remove_edge_clears_both_directions() {
        let mut graph = weighted_chain(&[5]);
        graph.remove_edge(2, 1);
        assert!(!graph.has_edge(1, 2));
        assert!(!graph.has_edge(2, 1));
    }

    #[test]
    fn remove_vertex_cascades_both_sides() {
        let mut graph = weighted_chain(&[1, 1]);
        graph.remove_vertex(2);
        assert!(graph.adjacent(1).is_empty());
        assert!(graph.adjacent(3).is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn duplicate_edge_keeps_original_weight() {
        let mut graph = weighted_chain(&[5]);
        graph.add_edge(1, 2, 99);
        let mst = graph.minimum_spanning_tree();
        assert_eq!(mst, vec![MstEdge { u: 1, v: 2, weight: 5 }]);
    }

    #[test]
    fn dijkstra_prefers_cheap_chain_over_direct_edge() {
        // Chain 1-2-3-4 with weights 1,2,3 against a direct edge of 10.
        let mut graph = weighted_chain(&[1, 2, 3]);
        graph.add_edge(1, 4, 10);
        let path = graph.find_shortest_path(1, 4).unwrap();
        assert_eq!(path, vec![1, 2, 3, 4]);
    }

    #[test]
    fn dijkstra_disconnected_is_none() {
        let mut graph = weighted_chain(&[1]);
        graph.add_vertex(10);
        assert_eq!(graph.find_shortest_path(1, 10), None);
    }

    #[test]
    fn mst_of_connected_graph_has_n_minus_one_edges() {
        let mut graph = GeographicNetwork::new();
        for id in 1..=4 {
            graph.add_vertex(id);
        }
        graph.add_edge(1, 2, 1);
        graph.add_edge(2, 3, 2);
        graph.add_edge(3, 4, 3);
        graph.add_edge(1, 4, 10);
        graph.add_edge(1, 3, 7);

        let mst = graph.minimum_spanning_tree();
        assert_eq!(mst.len(), 3);
        let total: Weight = mst.iter().map(|e| e.weight).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn mst_of_disconnected_graph_is_forest() {
        let mut graph = GeographicNetwork::new();
        for id in 1..=5 {
            graph.add_vertex(id);
        }
        graph.add_edge(1, 2, 1);
        graph.add_edge(2, 3, 1);
        graph.add_edge(4, 5, 1);

        // 5 vertices, 2 components: 3 forest edges.
        assert_eq!(graph.minimum_spanning_tree().len(), 3);
    }

    #[test]
    fn mst_of_single_vertex_is_empty() {
        let mut graph = GeographicNetwork::new();
        graph.add_vertex(1);
        assert!(graph.minimum_spanning_tree().is_empty());
    }

    #[test]
    fn triangle_has_no_critical_nodes() {
        let mut graph = GeographicNetwork::new();
        triangle(1, 2, 3, &mut graph);
        assert!(graph.find_critical_nodes().is_empty());
    }

    #[test]
    fn chain_internals_are_critical() {
        let graph = weighted_chain(&[1, 1, 1, 1]);
        assert_eq!(graph.find_critical_nodes(), vec![2, 3, 4]);
    }

    #[test]
    fn bridge_endpoints_are_critical() {
        let mut graph = GeographicNetwork::new();
        triangle(1, 2, 3, &mut graph);
        triangle(4, 5, 6, &mut graph);
        graph.add_edge(3, 4, 1);
        assert_eq!(graph.find_critical_nodes(), vec![3, 4]);
    }

    #[test]
    fn min_effort_diverges_from_min_sum() {
        // Min-sum route 1-2-4 costs 7 but crosses a weight-6 edge;
        // the minimax route 1-3-4 never exceeds weight 4.
        let mut graph = GeographicNetwork::new();
        for id in 1..=4 {
            graph.add_vertex(id);
        }
        graph.add_edge(1, 2, 1);
        graph.add_edge(2, 4, 6);
        graph.add_edge(1, 3, 4);
        graph.add_edge(3, 4, 4);

        let min_sum = graph.find_shortest_path(1, 4).unwrap();
        let min_effort = graph.find_path_with_min_effort(1, 4).unwrap();
        assert_eq!(min_sum, vec![1, 2, 4]);
        assert_eq!(min_effort, vec![1, 3, 4]);
    }

    #[test]
    fn min_effort_self_and_absent_semantics() {
        let graph = weighted_chain(&[2]);
        assert_eq!(graph.find_path_with_min_effort(1, 1), Some(vec![1]));
        assert_eq!(graph.find_path_with_min_effort(1, 9), None);
    }

    #[test]
    fn best_city_empty_graph_is_none() {
        let graph = GeographicNetwork::new();
        assert_eq!(graph.find_best_city(10), None);
    }

    #[test]
    fn best_city_tie_breaks_to_largest_id() {
        let mut graph = GeographicNetwork::new();
        for id in 1..=3 {
            graph.add_vertex(id);
        }
        assert_eq!(graph.find_best_city(0), Some(3));
    }

    #[test]
    fn best_city_counts_reachable_within_threshold() {
        let mut graph = GeographicNetwork::new();
        for id in 1..=4 {
            graph.add_vertex(id);
        }
        graph.add_edge(1, 2, 3);
        graph.add_edge(2, 3, 1);
        graph.add_edge(3, 4, 1);
        graph.add_edge(1, 4, 2);

        // Every vertex reaches the 3 others within 3 (1 reaches 3 via
        // the 1-4-3 route), so the tie resolves to the largest id.
        assert_eq!(graph.find_best_city(3), Some(4));

        // Tightening the threshold to 2 drops 2 and 3 out of vertex 1's
        // reach and leaves 1 strictly fewest.
        assert_eq!(graph.find_best_city(2), Some(1));
    }

    #[test]
    fn best_city_star_prefers_leaf() {
        let mut graph = GeographicNetwork::new();
        for id in 1..=5 {
            graph.add_vertex(id);
        }
        for leaf in 2..=5 {
            graph.add_edge(1, leaf, 1);
        }

        // The hub reaches 4 vertices; every leaf reaches only the hub.
        assert_eq!(graph.find_best_city(1), Some(5));
    }
}
