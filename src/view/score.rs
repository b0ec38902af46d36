// src/view/score.rs
//! Modularity (coupling) score.

use crate::graph::{GraphMetrics, ProjectGraph};

/// (outgoing + dependents) / total projects. Not bounded above by 1.
///
/// Zero for an empty graph.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn modularity_score(graph: &ProjectGraph, metrics: &GraphMetrics, id: &str) -> f64 {
    let total = graph.len();
    if total == 0 {
        return 0.0;
    }
    let coupling = graph.outgoing_count(id) + metrics.dependents(id);
    coupling as f64 / total as f64
}

/// Two-decimal rendering used by the table and the export.
#[must_use]
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}
