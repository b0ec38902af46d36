// src/view/mod.rs
//! The displayed project list: filtering, ordering, per-row metrics and the
//! summary line.

pub mod filter;
pub mod score;

pub use filter::{filter_and_sort, FilterCriteria};
pub use score::{format_score, modularity_score};

use serde::Serialize;

use crate::error::Result;
use crate::graph::{Analysis, GraphMetrics, Neighborhood, ProjectGraph};

/// Everything shown for one project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRow {
    pub id: String,
    pub dependencies: usize,
    pub dependents: usize,
    pub depth: usize,
    pub in_cycle: bool,
    pub cycle_path: Option<String>,
    pub modularity: f64,
    /// Display tags (hidden prefixes removed).
    pub tags: Vec<String>,
    pub dependency_targets: Vec<String>,
    pub dependent_sources: Vec<String>,
}

impl ProjectRow {
    #[must_use]
    pub fn build(graph: &ProjectGraph, metrics: &GraphMetrics, id: &str) -> Self {
        Self {
            id: id.to_string(),
            dependencies: graph.outgoing_count(id),
            dependents: metrics.dependents(id),
            depth: metrics.depth(id),
            in_cycle: metrics.in_cycle(id),
            cycle_path: metrics.cycle_path(id).map(ToString::to_string),
            modularity: modularity_score(graph, metrics, id),
            tags: graph.display_tags(id).into_iter().map(ToString::to_string).collect(),
            dependency_targets: graph.edges_from(id).iter().map(|e| e.target.clone()).collect(),
            dependent_sources: graph
                .dependents_of(id)
                .into_iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    #[must_use]
    pub fn tag_list(&self) -> String {
        self.tags.join(", ")
    }
}

/// Aggregates over the displayed rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub no_dependencies: usize,
    pub avg_dependencies: f64,
    pub no_dependents: usize,
    pub avg_dependents: f64,
}

impl Summary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_rows(rows: &[ProjectRow]) -> Self {
        let total = rows.len();
        let divisor = total.max(1) as f64;
        let deps: usize = rows.iter().map(|r| r.dependencies).sum();
        let dependents: usize = rows.iter().map(|r| r.dependents).sum();

        Self {
            total,
            no_dependencies: rows.iter().filter(|r| r.dependencies == 0).count(),
            avg_dependencies: deps as f64 / divisor,
            no_dependents: rows.iter().filter(|r| r.dependents == 0).count(),
            avg_dependents: dependents as f64 / divisor,
        }
    }
}

/// The filtered, sorted list plus its summary.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub rows: Vec<ProjectRow>,
    pub summary: Summary,
}

impl ProjectView {
    #[must_use]
    pub fn build(analysis: &Analysis, criteria: &FilterCriteria) -> Self {
        let graph = analysis.graph();
        let metrics = analysis.metrics();

        let rows: Vec<ProjectRow> = filter_and_sort(graph, metrics, criteria)
            .into_iter()
            .map(|id| ProjectRow::build(graph, metrics, id))
            .collect();
        let summary = Summary::from_rows(&rows);

        Self { rows, summary }
    }

    #[must_use]
    pub fn row(&self, id: &str) -> Option<&ProjectRow> {
        self.rows.iter().find(|r| r.id == id)
    }
}

/// The selected project's row, the cycles through it and its neighborhood.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionView {
    pub project: ProjectRow,
    pub cycles: Vec<String>,
    pub neighborhood: Neighborhood,
}

impl SelectionView {
    /// Builds the view for `criteria.selected_project`. `None` when nothing is selected.
    ///
    /// # Errors
    /// Returns `GraphError::UnknownProject` if the selection is not in the graph.
    pub fn build(analysis: &Analysis, criteria: &FilterCriteria) -> Result<Option<Self>> {
        let Some(id) = criteria.selected_project.as_deref() else {
            return Ok(None);
        };
        let neighborhood = analysis.neighborhood(id)?;
        let metrics = analysis.metrics();

        Ok(Some(Self {
            project: ProjectRow::build(analysis.graph(), metrics, id),
            cycles: metrics.cycles_containing(id).map(|c| c.path_string()).collect(),
            neighborhood,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Project, ProjectGraph};

    fn analysis() -> Analysis {
        let mut g = ProjectGraph::new();
        g.add_project(Project::new("web", vec!["app".into(), "npm:react".into()]));
        g.add_project(Project::new("ui", vec!["shared".into()]));
        g.add_project(Project::new("util", vec!["lib".into()]));
        g.add_edge("web", "ui");
        g.add_edge("web", "util");
        g.add_edge("ui", "util");
        g.add_edge("util", "ui");
        Analysis::new(g)
    }

    #[test]
    fn test_row_fields() {
        let analysis = analysis();
        let view = ProjectView::build(&analysis, &FilterCriteria::default());
        let web = view.row("web").unwrap();

        assert_eq!(web.dependencies, 2);
        assert_eq!(web.dependents, 0);
        assert_eq!(web.tags, vec!["app"]);
        assert_eq!(web.dependency_targets, vec!["ui", "util"]);
        assert!(!web.in_cycle);
        assert_eq!(format_score(web.modularity), "0.67");

        let ui = view.row("ui").unwrap();
        assert!(ui.in_cycle);
        assert_eq!(ui.dependent_sources, vec!["web", "util"]);
        assert_eq!(ui.cycle_path.as_deref(), Some("ui -> util -> ui"));
    }

    #[test]
    fn test_summary() {
        let analysis = analysis();
        let view = ProjectView::build(&analysis, &FilterCriteria::default());
        let s = &view.summary;

        assert_eq!(s.total, 3);
        assert_eq!(s.no_dependencies, 0);
        assert_eq!(s.no_dependents, 1);
        assert_eq!(format_score(s.avg_dependencies), "1.33");
        assert_eq!(format_score(s.avg_dependents), "1.33");
    }

    #[test]
    fn test_empty_summary() {
        let s = Summary::from_rows(&[]);
        assert_eq!(s.total, 0);
        assert!(s.avg_dependencies.abs() < f64::EPSILON);
    }

    #[test]
    fn test_selection() {
        let analysis = analysis();
        assert!(SelectionView::build(&analysis, &FilterCriteria::default())
            .unwrap()
            .is_none());

        let mut criteria = FilterCriteria::default();
        criteria.select(Some("util".to_string()));
        let selection = SelectionView::build(&analysis, &criteria).unwrap().unwrap();
        assert_eq!(selection.project.id, "util");
        assert_eq!(selection.cycles, vec!["ui -> util -> ui"]);
        assert_eq!(selection.neighborhood.nodes.len(), 3);

        criteria.select(Some("ghost".to_string()));
        assert!(SelectionView::build(&analysis, &criteria).is_err());
    }
}
