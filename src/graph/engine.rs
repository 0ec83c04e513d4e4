//! TrellisEngine: a registry of named graph instances behind the capability set

use super::GraphOps;
use dashmap::DashMap;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur in engine operations
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("Graph not found: {0}")]
    GraphNotFound(String),
}

/// Result type for engine operations
pub type TrellisResult<T> = Result<T, TrellisError>;

/// A concurrent registry of named graphs held behind `dyn GraphOps`.
///
/// Callers interact with stored graphs purely through the capability set and
/// never need to know the concrete variant. Each graph is exclusively owned
/// by the registry; access goes through [`read`](Self::read) and
/// [`update`](Self::update) closures so a single instance is never aliased.
#[derive(Debug, Default)]
pub struct TrellisEngine {
    graphs: DashMap<String, Box<dyn GraphOps + Send + Sync>>,
}

impl TrellisEngine {
    /// Create a new engine with no registered graphs
    pub fn new() -> Self {
        Self {
            graphs: DashMap::new(),
        }
    }

    /// Register a graph under a name, replacing any existing entry
    pub fn insert(&self, name: impl Into<String>, graph: Box<dyn GraphOps + Send + Sync>) {
        let name = name.into();
        debug!(%name, vertices = graph.vertex_count(), "graph registered");
        self.graphs.insert(name, graph);
    }

    /// Remove a graph. Returns whether an entry existed.
    pub fn remove(&self, name: &str) -> bool {
        let removed = self.graphs.remove(name).is_some();
        if removed {
            debug!(%name, "graph removed");
        }
        removed
    }

    /// Check if a graph is registered
    pub fn contains(&self, name: &str) -> bool {
        self.graphs.contains_key(name)
    }

    /// All registered graph names, in ascending order
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.graphs.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of registered graphs
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Whether no graphs are registered
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Run a read-only closure against a registered graph
    pub fn read<R>(
        &self,
        name: &str,
        f: impl FnOnce(&(dyn GraphOps + Send + Sync)) -> R,
    ) -> TrellisResult<R> {
        let entry = self
            .graphs
            .get(name)
            .ok_or_else(|| TrellisError::GraphNotFound(name.to_string()))?;
        Ok(f(entry.value().as_ref()))
    }

    /// Run a mutating closure against a registered graph
    pub fn update<R>(
        &self,
        name: &str,
        f: impl FnOnce(&mut (dyn GraphOps + Send + Sync)) -> R,
    ) -> TrellisResult<R> {
        let mut entry = self
            .graphs
            .get_mut(name)
            .ok_or_else(|| TrellisError::GraphNotFound(name.to_string()))?;
        Ok(f(entry.value_mut().as_mut()))
    }
}
