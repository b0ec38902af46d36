// src/graph/analysis.rs
//! A loaded graph paired with its metrics.

use std::path::Path;

use super::metrics::GraphMetrics;
use super::model::ProjectGraph;
use super::neighborhood::{self, Neighborhood};
use crate::error::{GraphError, Result};

/// The graph and the metrics computed from it.
///
/// Metrics depend only on the graph, so they are computed once here and
/// shared by every filter, sort and session action.
#[derive(Debug, Clone)]
pub struct Analysis {
    graph: ProjectGraph,
    metrics: GraphMetrics,
}

impl Analysis {
    #[must_use]
    pub fn new(graph: ProjectGraph) -> Self {
        let metrics = GraphMetrics::compute(&graph);
        Self { graph, metrics }
    }

    /// Loads a graph document and analyzes it.
    ///
    /// # Errors
    /// Returns the load errors of [`ProjectGraph::load`].
    pub fn load(path: &Path, hidden_tag_prefixes: Vec<String>) -> Result<Self> {
        let graph = ProjectGraph::load(path)?.with_hidden_tag_prefixes(hidden_tag_prefixes);
        Ok(Self::new(graph))
    }

    #[must_use]
    pub fn graph(&self) -> &ProjectGraph {
        &self.graph
    }

    #[must_use]
    pub fn metrics(&self) -> &GraphMetrics {
        &self.metrics
    }

    /// Neighborhood of a known project.
    ///
    /// # Errors
    /// Returns `GraphError::UnknownProject` if `id` is not in the project set.
    pub fn neighborhood(&self, id: &str) -> Result<Neighborhood> {
        if !self.graph.contains(id) {
            return Err(GraphError::UnknownProject(id.to_string()));
        }
        Ok(neighborhood::build(&self.graph, &self.metrics, Some(id)))
    }
}
