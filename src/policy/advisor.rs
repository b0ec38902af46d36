// src/policy/advisor.rs
//! Picks the edge to remove from a dependency cycle.

use serde::Serialize;

use super::layers::{check_layer_violation, Layer, LayerRule, LayerTags};
use crate::error::{GraphError, Result};
use crate::graph::{Cycle, GraphMetrics, ProjectGraph};

/// Why an edge was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreakReason {
    /// The edge breaks a layering rule.
    Layering { rule: LayerRule },
    /// No edge breaks a rule; the target has the fewest dependents.
    LeastDependents { dependents: usize },
}

impl std::fmt::Display for BreakReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Layering { rule } => write!(f, "{}", rule.description()),
            Self::LeastDependents { dependents } => write!(f, "least dependents ({dependents})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakSuggestion {
    pub from: String,
    pub to: String,
    pub reason: BreakReason,
}

impl BreakSuggestion {
    #[must_use]
    pub fn is_layer_violation(&self) -> bool {
        matches!(self.reason, BreakReason::Layering { .. })
    }
}

impl std::fmt::Display for BreakSuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.reason)
    }
}

/// Layering advisor over one analyzed graph.
pub struct Advisor<'a> {
    graph: &'a ProjectGraph,
    metrics: &'a GraphMetrics,
    tags: &'a LayerTags,
}

impl<'a> Advisor<'a> {
    #[must_use]
    pub fn new(graph: &'a ProjectGraph, metrics: &'a GraphMetrics, tags: &'a LayerTags) -> Self {
        Self {
            graph,
            metrics,
            tags,
        }
    }

    /// Layer of `id`; projects outside the graph are `unknown`.
    #[must_use]
    pub fn layer_of(&self, id: &str) -> Layer {
        self.graph
            .project(id)
            .map_or(Layer::Unknown, |p| self.tags.classify(p))
    }

    /// Suggests which edge of `cycle` to remove.
    ///
    /// The first edge in walk order (wrapping last -> first) that breaks a
    /// layering rule wins. Otherwise the edge whose target has the fewest
    /// dependents, ties going to the earliest edge.
    ///
    /// # Errors
    /// Returns `GraphError::EmptyCycle` if the cycle has no members.
    pub fn suggest_link_to_break(&self, cycle: &Cycle) -> Result<BreakSuggestion> {
        if cycle.is_empty() {
            return Err(GraphError::EmptyCycle);
        }

        if let Some(found) = self.first_violation(cycle) {
            return Ok(found);
        }

        self.least_dependents(cycle).ok_or(GraphError::EmptyCycle)
    }

    fn first_violation(&self, cycle: &Cycle) -> Option<BreakSuggestion> {
        cycle.edges().find_map(|(from, to)| {
            check_layer_violation(self.layer_of(from), self.layer_of(to)).map(|rule| {
                BreakSuggestion {
                    from: from.to_string(),
                    to: to.to_string(),
                    reason: BreakReason::Layering { rule },
                }
            })
        })
    }

    fn least_dependents(&self, cycle: &Cycle) -> Option<BreakSuggestion> {
        let mut best: Option<(&str, &str, usize)> = None;
        for (from, to) in cycle.edges() {
            let count = self.metrics.dependents(to);
            if best.map_or(true, |(_, _, current)| count < current) {
                best = Some((from, to, count));
            }
        }

        best.map(|(from, to, dependents)| BreakSuggestion {
            from: from.to_string(),
            to: to.to_string(),
            reason: BreakReason::LeastDependents { dependents },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Project;

    fn setup(projects: &[(&str, &[&str])], edges: &[(&str, &str)]) -> (ProjectGraph, GraphMetrics) {
        let mut g = ProjectGraph::new();
        for (id, tags) in projects {
            g.add_project(Project::new(*id, tags.iter().map(ToString::to_string).collect()));
        }
        for (from, to) in edges {
            g.add_edge(*from, *to);
        }
        let m = GraphMetrics::compute(&g);
        (g, m)
    }

    fn cycle(ids: &[&str]) -> Cycle {
        Cycle::new(ids.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_lib_to_app_edge_is_chosen() {
        let (g, m) = setup(
            &[("web", &["app"]), ("ui", &["shared"]), ("util", &["lib"])],
            &[("web", "ui"), ("ui", "util"), ("util", "web")],
        );
        let tags = LayerTags::default();
        let advisor = Advisor::new(&g, &m, &tags);

        let suggestion = advisor.suggest_link_to_break(&cycle(&["web", "ui", "util"])).unwrap();
        assert_eq!((suggestion.from.as_str(), suggestion.to.as_str()), ("util", "web"));
        assert_eq!(
            suggestion.reason,
            BreakReason::Layering {
                rule: LayerRule::NoUpwardToApp
            }
        );
    }

    #[test]
    fn test_earlier_violation_wins() {
        // lib -> shared comes before shared -> app in walk order.
        let (g, m) = setup(
            &[("util", &["lib"]), ("ui", &["shared"]), ("web", &["app"])],
            &[("util", "ui"), ("ui", "web"), ("web", "util")],
        );
        let tags = LayerTags::default();
        let advisor = Advisor::new(&g, &m, &tags);

        let suggestion = advisor.suggest_link_to_break(&cycle(&["util", "ui", "web"])).unwrap();
        assert_eq!((suggestion.from.as_str(), suggestion.to.as_str()), ("util", "ui"));
        assert_eq!(suggestion.reason.to_string(), LayerRule::LibStaysAtBottom.description());
    }

    #[test]
    fn test_fallback_to_least_dependents() {
        let (g, m) = setup(
            &[("a", &[]), ("b", &[]), ("c", &[]), ("x", &[])],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("x", "a"), ("x", "b")],
        );
        let tags = LayerTags::default();
        let advisor = Advisor::new(&g, &m, &tags);

        // dependents: a=2, b=2, c=1
        let suggestion = advisor.suggest_link_to_break(&cycle(&["a", "b", "c"])).unwrap();
        assert_eq!((suggestion.from.as_str(), suggestion.to.as_str()), ("b", "c"));
        assert_eq!(suggestion.reason.to_string(), "least dependents (1)");
        assert!(!suggestion.is_layer_violation());
    }

    #[test]
    fn test_fallback_tie_goes_to_first_edge() {
        let (g, m) = setup(&[("a", &[]), ("b", &[])], &[("a", "b"), ("b", "a")]);
        let tags = LayerTags::default();
        let advisor = Advisor::new(&g, &m, &tags);

        let suggestion = advisor.suggest_link_to_break(&cycle(&["a", "b"])).unwrap();
        assert_eq!((suggestion.from.as_str(), suggestion.to.as_str()), ("a", "b"));
    }

    #[test]
    fn test_self_loop_yields_suggestion() {
        let (g, m) = setup(&[("a", &["lib"])], &[("a", "a")]);
        let tags = LayerTags::default();
        let advisor = Advisor::new(&g, &m, &tags);

        let suggestion = advisor.suggest_link_to_break(&cycle(&["a"])).unwrap();
        assert_eq!((suggestion.from.as_str(), suggestion.to.as_str()), ("a", "a"));
    }

    #[test]
    fn test_empty_cycle_is_an_error() {
        let (g, m) = setup(&[], &[]);
        let tags = LayerTags::default();
        let advisor = Advisor::new(&g, &m, &tags);

        assert!(matches!(
            advisor.suggest_link_to_break(&cycle(&[])),
            Err(GraphError::EmptyCycle)
        ));
    }
}
