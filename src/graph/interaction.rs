//! InteractionGraph: a bipartite user/post graph with recommendation analytics

use super::{VertexId, Weight};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Which side of the bipartite graph a vertex belongs to.
///
/// The two id spaces are logically disjoint but never cross-validated by the
/// structure itself; keeping them disjoint is caller discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    User,
    Post,
}

/// A weighted interaction endpoint, stored on both sides of the edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// The vertex on the other side of the edge
    pub target: VertexId,
    /// Interaction strength (e.g. 1 for a like, 5 for a comment)
    pub weight: Weight,
}

/// A weighted, directed, bipartite graph of user → post interactions.
///
/// Every interaction is stored twice: once in the user→post map and once in
/// the inverse post→user map, so lookups are efficient in both directions.
/// The graph is structurally independent of the [`GraphOps`](super::GraphOps)
/// variants and does not implement that contract.
///
/// Move-only: no `Clone`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InteractionGraph {
    /// user id -> posts the user interacted with
    user_to_post: HashMap<VertexId, Vec<Interaction>>,
    /// post id -> users who interacted with the post (inverse map)
    post_to_user: HashMap<VertexId, Vec<Interaction>>,
}

impl InteractionGraph {
    /// Create an empty interaction graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex on the given side. Re-adding is a no-op.
    pub fn add_vertex(&mut self, id: VertexId, node_type: NodeType) {
        self.side_mut(node_type).entry(id).or_default();
    }

    /// Remove a vertex and every interaction referencing it, from both the
    /// forward and inverse maps. Absent vertex: no-op.
    pub fn remove_vertex(&mut self, id: VertexId, node_type: NodeType) {
        if self.side_mut(node_type).remove(&id).is_some() {
            let inverse = match node_type {
                NodeType::User => &mut self.post_to_user,
                NodeType::Post => &mut self.user_to_post,
            };
            for interactions in inverse.values_mut() {
                interactions.retain(|i| i.target != id);
            }
        }
    }

    /// Record a weighted interaction from a user to a post.
    ///
    /// No-op if either endpoint is absent (or registered on the wrong side),
    /// or if the interaction already exists.
    pub fn add_interaction(&mut self, user: VertexId, post: VertexId, weight: Weight) {
        if !self.user_to_post.contains_key(&user)
            || !self.post_to_user.contains_key(&post)
            || self.has_interaction(user, post)
        {
            return;
        }
        if let Some(posts) = self.user_to_post.get_mut(&user) {
            posts.push(Interaction {
                target: post,
                weight,
            });
        }
        if let Some(users) = self.post_to_user.get_mut(&post) {
            users.push(Interaction {
                target: user,
                weight,
            });
        }
    }

    /// Whether the user has interacted with the post
    pub fn has_interaction(&self, user: VertexId, post: VertexId) -> bool {
        self.user_to_post
            .get(&user)
            .map_or(false, |posts| posts.iter().any(|i| i.target == post))
    }

    /// Number of users
    pub fn user_count(&self) -> usize {
        self.user_to_post.len()
    }

    /// Number of posts
    pub fn post_count(&self) -> usize {
        self.post_to_user.len()
    }

    /// Users with the most similar interaction history, by Jaccard index.
    ///
    /// Similarity compares the *set* of posts each user touched:
    /// |intersection| / |union|. Users with zero overlap are excluded
    /// entirely rather than reported with a zero score. Sorted descending by
    /// score (ties ascending by id), truncated to `top_n`.
    pub fn find_similar_users(&self, user: VertexId, top_n: usize) -> Vec<(VertexId, f64)> {
        let Some(own_posts) = self.post_set(user) else {
            return Vec::new();
        };

        let mut scored: Vec<(VertexId, f64)> = self
            .user_to_post
            .keys()
            .filter(|&&other| other != user)
            .filter_map(|&other| {
                let other_posts = self.post_set(other)?;
                let intersection = own_posts.intersection(&other_posts).count();
                if intersection == 0 {
                    return None;
                }
                let union = own_posts.len() + other_posts.len() - intersection;
                Some((other, intersection as f64 / union as f64))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(top_n);
        scored
    }

    /// Collaborative-filtering post recommendations.
    ///
    /// Aggregates, across similar users weighted by their similarity score,
    /// the posts they interacted with that `user` has not. Candidates rank
    /// by aggregated weighted score descending (ties ascending by id),
    /// truncated to `top_n`. No similar users or no novel posts: empty.
    pub fn recommend_posts(&self, user: VertexId, top_n: usize) -> Vec<VertexId> {
        let Some(seen) = self.post_set(user) else {
            return Vec::new();
        };

        let mut candidate_scores: HashMap<VertexId, f64> = HashMap::new();
        for (similar_user, similarity) in self.find_similar_users(user, usize::MAX) {
            for interaction in self.user_to_post.get(&similar_user).into_iter().flatten() {
                if seen.contains(&interaction.target) {
                    continue;
                }
                *candidate_scores.entry(interaction.target).or_default() +=
                    similarity * interaction.weight as f64;
            }
        }

        let mut ranked: Vec<(VertexId, f64)> = candidate_scores.into_iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(top_n);
        ranked.into_iter().map(|(post, _)| post).collect()
    }

    /// Influence-weighted trend score for every post with at least one
    /// interaction.
    ///
    /// A post's score is the sum over its interacting users of
    /// `page_rank(user) × interaction weight`; users absent from the
    /// supplied map contribute 0.
    pub fn calculate_trend_scores(
        &self,
        page_ranks: &HashMap<VertexId, f64>,
    ) -> HashMap<VertexId, f64> {
        self.post_to_user
            .iter()
            .filter(|(_, users)| !users.is_empty())
            .map(|(&post, users)| {
                let score = users
                    .iter()
                    .map(|i| page_ranks.get(&i.target).copied().unwrap_or(0.0) * i.weight as f64)
                    .sum();
                (post, score)
            })
            .collect()
    }

    /// A valid processing order via Kahn's topological sort.
    ///
    /// In the implicit DAG every user precedes every post it interacts with.
    /// The full vertex set (users and posts) is returned; an empty graph
    /// yields an empty, valid order. A cycle is structurally impossible in
    /// this bipartite model, but if the invariant were ever broken the
    /// function returns `None` instead of looping or corrupting output.
    pub fn processing_order(&self) -> Option<Vec<VertexId>> {
        let mut users: Vec<VertexId> = self.user_to_post.keys().copied().collect();
        users.sort_unstable();
        let mut posts: Vec<VertexId> = self.post_to_user.keys().copied().collect();
        posts.sort_unstable();
        let total = users.len() + posts.len();

        let mut in_degree: HashMap<VertexId, usize> = posts
            .iter()
            .map(|&post| (post, self.post_to_user[&post].len()))
            .collect();

        // Users never have incoming edges; isolated posts start ready too.
        let mut queue: VecDeque<VertexId> = users.iter().copied().collect();
        queue.extend(posts.iter().copied().filter(|p| in_degree[p] == 0));

        let mut processing_users: HashSet<VertexId> = users.iter().copied().collect();
        let mut order = Vec::with_capacity(total);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            if !processing_users.remove(&id) {
                continue;
            }
            for interaction in self.user_to_post.get(&id).into_iter().flatten() {
                if let Some(remaining) = in_degree.get_mut(&interaction.target) {
                    *remaining -= 1;
                    if *remaining == 0 {
                        queue.push_back(interaction.target);
                    }
                }
            }
        }

        // Unreachable for a well-formed bipartite graph; anything left over
        // would mean a cycle.
        if order.len() == total {
            Some(order)
        } else {
            None
        }
    }

    fn side_mut(&mut self, node_type: NodeType) -> &mut HashMap<VertexId, Vec<Interaction>> {
        match node_type {
            NodeType::User => &mut self.user_to_post,
            NodeType::Post => &mut self.post_to_user,
        }
    }

    fn post_set(&self, user: VertexId) -> Option<HashSet<VertexId>> {
        self.user_to_post
            .get(&user)
            .map(|posts| posts.iter().map(|i| i.target).collect())
    }
}
