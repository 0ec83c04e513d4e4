//! SocialGraph: a directed follow graph with influence analytics

use super::{GraphOps, VertexId, Weight};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use tracing::trace;

/// A directed, unweighted-for-traversal graph of follow relationships.
///
/// Edges are stored as one-directional adjacency entries: `add_edge(a, b, _)`
/// means `a` follows `b`. Traversal treats every edge as cost 1, so
/// [`find_shortest_path`](GraphOps::find_shortest_path) is a breadth-first
/// search returning the minimal-edge-count path.
///
/// The graph is move-only: ownership transfers on move and there is no
/// `Clone`, so adjacency storage is never silently duplicated.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SocialGraph {
    /// Outgoing adjacency: follower -> followed
    adjacency: HashMap<VertexId, Vec<VertexId>>,
}

impl SocialGraph {
    /// Create an empty social graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Find every mutual follow pair ("echo chamber").
    ///
    /// Each unordered pair (u, v) with u ≠ v where both edges u→v and v→u
    /// exist is reported exactly once, as `(smaller, larger)` in ascending
    /// order. Self-loops never qualify.
    pub fn find_echo_chambers(&self) -> Vec<(VertexId, VertexId)> {
        let mut pairs = Vec::new();
        for (&u, targets) in &self.adjacency {
            for &v in targets {
                if u < v && self.has_edge(v, u) {
                    pairs.push((u, v));
                }
            }
        }
        pairs.sort_unstable();
        pairs
    }

    /// Influence scores via power-iteration PageRank.
    ///
    /// Every vertex starts at rank 1/N. Each iteration distributes
    /// `damping × rank(u)/out_degree(u)` along u's out-edges on top of the
    /// uniform `(1-damping)/N` baseline. Rank mass held by dangling vertices
    /// (zero out-degree) is spread evenly across all vertices, so the total
    /// rank sum stays ≈ 1 even when sink vertices exist.
    ///
    /// Empty graph: empty map. Singleton vertex: rank 1.0.
    pub fn calculate_pagerank(
        &self,
        damping: f64,
        iterations: usize,
    ) -> HashMap<VertexId, f64> {
        let ids = self.sorted_ids();
        let n = ids.len();
        if n == 0 {
            return HashMap::new();
        }

        let index: HashMap<VertexId, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let outgoing: Vec<Vec<usize>> = ids
            .iter()
            .map(|id| {
                self.adjacency[id]
                    .iter()
                    .filter_map(|t| index.get(t).copied())
                    .collect()
            })
            .collect();

        let base = (1.0 - damping) / n as f64;
        let mut scores = vec![1.0 / n as f64; n];

        for iteration in 0..iterations {
            let dangling_mass: f64 = (0..n)
                .filter(|&u| outgoing[u].is_empty())
                .map(|u| scores[u])
                .sum();

            let mut next = vec![base + damping * dangling_mass / n as f64; n];
            for u in 0..n {
                if outgoing[u].is_empty() {
                    continue;
                }
                let share = damping * scores[u] / outgoing[u].len() as f64;
                for &v in &outgoing[u] {
                    next[v] += share;
                }
            }

            let delta: f64 = scores
                .iter()
                .zip(next.iter())
                .map(|(a, b)| (a - b).abs())
                .sum();
            trace!(iteration, delta, "pagerank sweep");

            scores = next;
        }

        ids.into_iter().zip(scores).collect()
    }

    /// Strongly-connected-component communities via Kosaraju's algorithm.
    ///
    /// First DFS pass records finish order on the original graph; the second
    /// pass walks the transposed graph in reverse finish order, each
    /// resulting tree being one community. Both passes use an explicit-stack
    /// iterative DFS, so deep graphs cannot exhaust the call stack.
    ///
    /// Isolated vertices form singleton communities; a cycle spanning all
    /// vertices yields exactly one community containing all of them.
    pub fn find_communities(&self) -> Vec<Vec<VertexId>> {
        let ids = self.sorted_ids();
        let n = ids.len();
        let index: HashMap<VertexId, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut transposed: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (u, id) in ids.iter().enumerate() {
            for target in &self.adjacency[id] {
                if let Some(&v) = index.get(target) {
                    adj[u].push(v);
                    transposed[v].push(u);
                }
            }
        }

        // Pass 1: finish order on the original graph.
        let mut visited = vec![false; n];
        let mut finish: Vec<usize> = Vec::with_capacity(n);
        for start in 0..n {
            if visited[start] {
                continue;
            }
            visited[start] = true;
            // Frame: (vertex, next-neighbor cursor)
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            while let Some((v, cursor)) = stack.last_mut() {
                let v = *v;
                if *cursor < adj[v].len() {
                    let w = adj[v][*cursor];
                    *cursor += 1;
                    if !visited[w] {
                        visited[w] = true;
                        stack.push((w, 0));
                    }
                } else {
                    finish.push(v);
                    stack.pop();
                }
            }
        }

        // Pass 2: collect trees on the transposed graph in reverse finish order.
        let mut collected = vec![false; n];
        let mut communities = Vec::new();
        for &root in finish.iter().rev() {
            if collected[root] {
                continue;
            }
            collected[root] = true;
            let mut component = Vec::new();
            let mut stack = vec![root];
            while let Some(v) = stack.pop() {
                component.push(ids[v]);
                for &w in &transposed[v] {
                    if !collected[w] {
                        collected[w] = true;
                        stack.push(w);
                    }
                }
            }
            component.sort_unstable();
            communities.push(component);
        }

        communities
    }

    fn sorted_ids(&self) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self.adjacency.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl GraphOps for SocialGraph {
    fn add_vertex(&mut self, id: VertexId) {
        self.adjacency.entry(id).or_default();
    }

    fn remove_vertex(&mut self, id: VertexId) {
        if self.adjacency.remove(&id).is_some() {
            for targets in self.adjacency.values_mut() {
                targets.retain(|&t| t != id);
            }
        }
    }

    fn add_edge(&mut self, from: VertexId, to: VertexId, _weight: Weight) {
        if !self.adjacency.contains_key(&to) {
            return;
        }
        if let Some(targets) = self.adjacency.get_mut(&from) {
            if !targets.contains(&to) {
                targets.push(to);
            }
        }
    }

    fn remove_edge(&mut self, from: VertexId, to: VertexId) {
        if let Some(targets) = self.adjacency.get_mut(&from) {
            targets.retain(|&t| t != to);
        }
    }

    fn has_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.adjacency
            .get(&from)
            .map_or(false, |targets| targets.contains(&to))
    }

    fn adjacent(&self, from: VertexId) -> Vec<VertexId> {
        self.adjacency.get(&from).cloned().unwrap_or_default()
    }

    /// BFS for the minimal-edge-count path.
    ///
    /// Neighbors expand in adjacency insertion order, so tie-breaking among
    /// equal-length paths is deterministic.
    fn find_shortest_path(&self, start: VertexId, end: VertexId) -> Option<Vec<VertexId>> {
        if !self.adjacency.contains_key(&start) || !self.adjacency.contains_key(&end) {
            return None;
        }
        if start == end {
            return Some(vec![start]);
        }

        let mut predecessors: HashMap<VertexId, VertexId> = HashMap::new();
        let mut queue: VecDeque<VertexId> = VecDeque::new();
        queue.push_back(start);

        'search: while let Some(current) = queue.pop_front() {
            for &neighbor in self.adjacency.get(&current).into_iter().flatten() {
                if neighbor == start || predecessors.contains_key(&neighbor) {
                    continue;
                }
                predecessors.insert(neighbor, current);
                if neighbor == end {
                    break 'search;
                }
                queue.push_back(neighbor);
            }
        }

        predecessors.get(&end)?;

        // Walk backwards from end to start.
        let mut path = vec![end];
        let mut current = end;
        while let Some(&pred) = predecessors.get(&current) {
            path.push(pred);
            current = pred;
        }
        path.reverse();
        Some(path)
    }

    fn contains_vertex(&self, id: VertexId) -> bool {
        self.adjacency.contains_key(&id)
    }

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    fn vertices(&self) -> Vec<VertexId> {
        self.sorted_ids()
    }
}
