// src/graph/neighborhood.rs
//! One-hop view around a selected project: what it depends on and what
//! depends on it.

use serde::Serialize;
use std::collections::HashSet;

use super::metrics::GraphMetrics;
use super::model::ProjectGraph;

/// Role of a node in the neighborhood view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Selected,
    Dependency,
    Dependent,
}

impl NodeRole {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Selected => "selected",
            Self::Dependency => "dependency",
            Self::Dependent => "dependent",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NeighborNode {
    pub id: String,
    pub role: NodeRole,
    /// Target absent from the project set.
    pub external: bool,
    /// Multi-line description shown alongside the node.
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Neighborhood {
    pub nodes: Vec<NeighborNode>,
    pub edges: Vec<NeighborEdge>,
}

impl Neighborhood {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&NeighborNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn with_role(&self, role: NodeRole) -> impl Iterator<Item = &NeighborNode> {
        self.nodes.iter().filter(move |n| n.role == role)
    }
}

/// Builds the neighborhood of `selected`. `None` yields an empty view.
#[must_use]
pub fn build(graph: &ProjectGraph, metrics: &GraphMetrics, selected: Option<&str>) -> Neighborhood {
    let Some(selected) = selected else {
        return Neighborhood::default();
    };

    let mut builder = Builder::default();

    let dependents = graph.dependents_of(selected);
    builder.add_node(
        selected,
        NodeRole::Selected,
        false,
        format!(
            "{selected}\nDependencies: {}\nDependents: {}",
            target_list(graph, selected),
            or_none(&dependents.join(", ")),
        ),
    );

    for edge in graph.edges_from(selected) {
        let dep = edge.target.as_str();
        let external = !graph.contains(dep);
        let summary = if external {
            format!("{dep}\n[External or Missing Node]")
        } else {
            describe(graph, metrics, dep)
        };
        builder.add_node(dep, NodeRole::Dependency, external, summary);
        builder.add_edge(selected, dep);
    }

    for dep in dependents {
        builder.add_node(dep, NodeRole::Dependent, false, describe(graph, metrics, dep));
        builder.add_edge(dep, selected);
    }

    builder.finish()
}

fn describe(graph: &ProjectGraph, metrics: &GraphMetrics, id: &str) -> String {
    format!(
        "{id}\nDependencies: {}\nDependents: {}",
        target_list(graph, id),
        metrics.dependents(id)
    )
}

fn target_list(graph: &ProjectGraph, id: &str) -> String {
    let targets: Vec<&str> = graph.edges_from(id).iter().map(|e| e.target.as_str()).collect();
    or_none(&targets.join(", "))
}

fn or_none(list: &str) -> String {
    if list.is_empty() {
        "None".to_string()
    } else {
        list.to_string()
    }
}

#[derive(Default)]
struct Builder {
    node_ids: HashSet<String>,
    edge_keys: HashSet<(String, String)>,
    view: Neighborhood,
}

impl Builder {
    fn add_node(&mut self, id: &str, role: NodeRole, external: bool, summary: String) {
        if !self.node_ids.insert(id.to_string()) {
            tracing::warn!(node = id, "duplicate node in neighborhood view");
            return;
        }
        self.view.nodes.push(NeighborNode {
            id: id.to_string(),
            role,
            external,
            summary,
        });
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        if !self.edge_keys.insert((from.to_string(), to.to_string())) {
            tracing::warn!(edge = %format!("{from}->{to}"), "duplicate edge in neighborhood view");
            return;
        }
        self.view.edges.push(NeighborEdge {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    fn finish(self) -> Neighborhood {
        tracing::debug!(
            nodes = self.view.nodes.len(),
            edges = self.view.edges.len(),
            "built neighborhood view"
        );
        self.view
    }
}
