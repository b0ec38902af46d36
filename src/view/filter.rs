// src/view/filter.rs
//! Operator-controlled filter criteria and the display sort order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::graph::{GraphMetrics, ProjectGraph};

/// Filter state. Defaults: no lower bound, no upper bound, no tags,
/// cycles-only off, nothing selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub min_dependencies: usize,
    /// `None` means unbounded.
    pub max_dependencies: Option<usize>,
    pub min_dependents: usize,
    /// `None` means unbounded.
    pub max_dependents: Option<usize>,
    pub selected_tags: BTreeSet<String>,
    pub show_cycles_only: bool,
    pub selected_project: Option<String>,
}

impl FilterCriteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn dependencies(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_dependencies = min;
        self.max_dependencies = max;
        self
    }

    #[must_use]
    pub fn dependents(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_dependents = min;
        self.max_dependents = max;
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.selected_tags.insert(tag.into());
        self
    }

    #[must_use]
    pub fn cycles_only(mut self, on: bool) -> Self {
        self.show_cycles_only = on;
        self
    }

    /// Checks or unchecks a tag. Returns whether it is now selected.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.selected_tags.remove(tag) {
            false
        } else {
            self.selected_tags.insert(tag.to_string());
            true
        }
    }

    pub fn select(&mut self, project: Option<String>) {
        self.selected_project = project;
    }

    /// Tests one project. `min > max` simply matches nothing.
    #[must_use]
    pub fn matches(&self, graph: &ProjectGraph, metrics: &GraphMetrics, id: &str) -> bool {
        let outgoing = graph.outgoing_count(id);
        let dependents = metrics.dependents(id);

        within(outgoing, self.min_dependencies, self.max_dependencies)
            && within(dependents, self.min_dependents, self.max_dependents)
            && self.matches_tags(graph, id)
            && (!self.show_cycles_only || metrics.in_cycle(id))
    }

    fn matches_tags(&self, graph: &ProjectGraph, id: &str) -> bool {
        if self.selected_tags.is_empty() {
            return true;
        }
        graph
            .project(id)
            .is_some_and(|p| p.tags.iter().any(|t| self.selected_tags.contains(t)))
    }
}

fn within(value: usize, min: usize, max: Option<usize>) -> bool {
    value >= min && max.map_or(true, |max| value <= max)
}

/// Filters the project set and sorts it for display.
///
/// Order: ascending outgoing edges, then ascending dependents, then the
/// `, `-joined display tags. The sort is stable, so full ties keep id order.
#[must_use]
pub fn filter_and_sort<'g>(
    graph: &'g ProjectGraph,
    metrics: &GraphMetrics,
    criteria: &FilterCriteria,
) -> Vec<&'g str> {
    let mut keyed: Vec<(&'g str, SortKey)> = graph
        .project_ids()
        .filter(|id| criteria.matches(graph, metrics, id))
        .map(|id| (id, SortKey::new(graph, metrics, id)))
        .collect();

    keyed.sort_by(|(_, a), (_, b)| a.cmp(b));

    tracing::debug!(
        matched = keyed.len(),
        total = graph.len(),
        "filtered project list"
    );
    keyed.into_iter().map(|(id, _)| id).collect()
}

#[derive(Debug, PartialEq, Eq)]
struct SortKey {
    outgoing: usize,
    dependents: usize,
    tags: String,
}

impl SortKey {
    fn new(graph: &ProjectGraph, metrics: &GraphMetrics, id: &str) -> Self {
        Self {
            outgoing: graph.outgoing_count(id),
            dependents: metrics.dependents(id),
            tags: graph.display_tags(id).join(", "),
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.outgoing
            .cmp(&other.outgoing)
            .then_with(|| self.dependents.cmp(&other.dependents))
            .then_with(|| self.tags.cmp(&other.tags))
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Project;

    fn setup() -> (ProjectGraph, GraphMetrics) {
        let mut g = ProjectGraph::new();
        g.add_project(Project::new("web", vec!["app".into(), "npm:react".into()]));
        g.add_project(Project::new("admin", vec!["app".into()]));
        g.add_project(Project::new("ui", vec!["shared".into()]));
        g.add_project(Project::new("util", vec!["lib".into()]));
        g.add_project(Project::new("a", vec![]));
        g.add_project(Project::new("b", vec![]));
        g.add_edge("web", "ui");
        g.add_edge("web", "util");
        g.add_edge("admin", "ui");
        g.add_edge("ui", "util");
        g.add_edge("a", "b");
        g.add_edge("b", "a");
        let m = GraphMetrics::compute(&g);
        (g, m)
    }

    #[test]
    fn test_default_criteria_match_everything() {
        let (g, m) = setup();
        assert_eq!(filter_and_sort(&g, &m, &FilterCriteria::default()).len(), g.len());
    }

    #[test]
    fn test_inverted_bounds_match_nothing() {
        let (g, m) = setup();
        let criteria = FilterCriteria::new().dependencies(5, Some(2));
        assert!(filter_and_sort(&g, &m, &criteria).is_empty());
    }

    #[test]
    fn test_dependency_bounds() {
        let (g, m) = setup();
        let criteria = FilterCriteria::new().dependencies(2, None);
        assert_eq!(filter_and_sort(&g, &m, &criteria), vec!["web"]);

        let criteria = FilterCriteria::new().dependencies(0, Some(0));
        assert_eq!(filter_and_sort(&g, &m, &criteria), vec!["util"]);
    }

    #[test]
    fn test_dependent_bounds() {
        let (g, m) = setup();
        let criteria = FilterCriteria::new().dependents(2, Some(2));
        assert_eq!(filter_and_sort(&g, &m, &criteria), vec!["util", "ui"]);
    }

    #[test]
    fn test_tag_filter_is_any_of() {
        let (g, m) = setup();
        let criteria = FilterCriteria::new().tag("lib").tag("shared");
        let ids = filter_and_sort(&g, &m, &criteria);
        assert_eq!(ids, vec!["util", "ui"]);
    }

    #[test]
    fn test_cycles_only() {
        let (g, m) = setup();
        let criteria = FilterCriteria::new().cycles_only(true);
        assert_eq!(filter_and_sort(&g, &m, &criteria), vec!["a", "b"]);
    }

    #[test]
    fn test_sort_order() {
        let (g, m) = setup();
        let ids = filter_and_sort(&g, &m, &FilterCriteria::default());
        // util: 0 out, 2 in | admin: 1 out, 0 in | a, b: 1 out, 1 in (tags tie, id order)
        // ui: 1 out, 2 in | web: 2 out, 0 in
        assert_eq!(ids, vec!["util", "admin", "a", "b", "ui", "web"]);
    }

    #[test]
    fn test_sort_breaks_ties_on_tags() {
        let mut g = ProjectGraph::new();
        g.add_project(Project::new("x", vec!["zeta".into()]));
        g.add_project(Project::new("y", vec!["alpha".into(), "npm:zzz".into()]));
        let m = GraphMetrics::compute(&g);
        assert_eq!(filter_and_sort(&g, &m, &FilterCriteria::default()), vec!["y", "x"]);
    }

    #[test]
    fn test_toggle_tag() {
        let mut criteria = FilterCriteria::new();
        assert!(criteria.toggle_tag("app"));
        assert!(criteria.selected_tags.contains("app"));
        assert!(!criteria.toggle_tag("app"));
        assert!(criteria.selected_tags.is_empty());
    }
}
