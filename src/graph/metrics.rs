// src/graph/metrics.rs
//! Dependents, depth and cycle detection in one traversal.
//!
//! Depth-first search from every unprocessed project, driven by an explicit
//! work stack so pathological graphs cannot overflow the call stack. State:
//! - `depth`: memoized result for fully processed projects
//! - `on_path`: projects on the active stack
//! - `path`: ordered ids from the current root to the top of the stack
//!
//! An edge into `on_path` is a back-edge and closes a cycle. It is not
//! followed and contributes nothing to depth. Edges that belong to a recorded
//! cycle pass the child's depth through without adding a level, so every
//! member of a closed loop reports the same depth. The pass-through holds
//! whatever the child's depth is, including depth it picked up from a side
//! path off the cycle: for `a -> b -> c -> a` with `b -> d -> c`, `b` is
//! `d + 1 = 2` and `a` takes `b`'s 2 over the cycle edge rather than 3.
//! External targets are never visited.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::cycles::Cycle;
use super::model::ProjectGraph;

/// Derived metrics for one graph. Depends only on the graph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphMetrics {
    dependents: HashMap<String, usize>,
    depth: HashMap<String, usize>,
    cycles: Vec<Cycle>,
    cycle_paths: HashMap<String, String>,
    #[serde(skip)]
    members: HashSet<String>,
}

impl GraphMetrics {
    /// Runs the full traversal over `graph`.
    #[must_use]
    pub fn compute(graph: &ProjectGraph) -> Self {
        let dependents = count_dependents(graph);
        let traversal = Traversal::run(graph);

        let members = traversal
            .cycles
            .iter()
            .flat_map(|c| c.members().iter().cloned())
            .collect();

        tracing::debug!(
            projects = graph.len(),
            cycles = traversal.cycles.len(),
            "computed graph metrics"
        );

        Self {
            dependents,
            depth: traversal.depth,
            cycles: traversal.cycles,
            cycle_paths: traversal.cycle_paths,
            members,
        }
    }

    /// Number of edges targeting `id` (multiplicity, not distinct sources).
    #[must_use]
    pub fn dependents(&self, id: &str) -> usize {
        self.dependents.get(id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn depth(&self, id: &str) -> usize {
        self.depth.get(id).copied().unwrap_or(0)
    }

    /// Distinct cycles in discovery order.
    #[must_use]
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    /// Path of the first cycle whose back-edge targeted `id`.
    #[must_use]
    pub fn cycle_path(&self, id: &str) -> Option<&str> {
        self.cycle_paths.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn in_cycle(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Recorded cycles that pass through `id`, in discovery order.
    pub fn cycles_containing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Cycle> + 'a {
        self.cycles.iter().filter(move |c| c.contains(id))
    }
}

fn count_dependents(graph: &ProjectGraph) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> =
        graph.project_ids().map(|id| (id.to_string(), 0)).collect();

    for edge in graph.all_edges() {
        *counts.entry(edge.target.clone()).or_insert(0) += 1;
    }
    counts
}

struct Frame<'g> {
    node: &'g str,
    next_edge: usize,
    best: usize,
}

struct Traversal<'g> {
    graph: &'g ProjectGraph,
    depth: HashMap<String, usize>,
    on_path: HashSet<&'g str>,
    path: Vec<&'g str>,
    cycle_edges: HashSet<(&'g str, &'g str)>,
    seen_keys: HashSet<String>,
    cycles: Vec<Cycle>,
    cycle_paths: HashMap<String, String>,
}

impl<'g> Traversal<'g> {
    fn run(graph: &'g ProjectGraph) -> Self {
        let mut state = Self {
            graph,
            depth: HashMap::new(),
            on_path: HashSet::new(),
            path: Vec::new(),
            cycle_edges: HashSet::new(),
            seen_keys: HashSet::new(),
            cycles: Vec::new(),
            cycle_paths: HashMap::new(),
        };

        for root in graph.project_ids() {
            if !state.depth.contains_key(root) {
                state.visit(root);
            }
        }
        state
    }

    fn visit(&mut self, root: &'g str) {
        let graph = self.graph;
        let mut stack = vec![self.enter(root)];

        while let Some(frame) = stack.last_mut() {
            let edges = graph.edges_from(frame.node);
            let Some(edge) = edges.get(frame.next_edge) else {
                let done = self.leave(&mut stack);
                if let Some((child, child_depth)) = done {
                    if let Some(parent) = stack.last_mut() {
                        let step = self.contribution(parent.node, child, child_depth);
                        parent.best = parent.best.max(step);
                    }
                }
                continue;
            };
            frame.next_edge += 1;

            let source = frame.node;
            let target = edge.target.as_str();

            if !graph.contains(target) {
                continue;
            }
            if self.on_path.contains(target) {
                self.record_cycle(target);
                continue;
            }
            if let Some(&memo) = self.depth.get(target) {
                let step = self.contribution(source, target, memo);
                frame.best = frame.best.max(step);
                continue;
            }
            let child = self.enter(target);
            stack.push(child);
        }
    }

    fn enter(&mut self, node: &'g str) -> Frame<'g> {
        self.on_path.insert(node);
        self.path.push(node);
        Frame {
            node,
            next_edge: 0,
            best: 0,
        }
    }

    fn leave(&mut self, stack: &mut Vec<Frame<'g>>) -> Option<(&'g str, usize)> {
        let frame = stack.pop()?;
        self.on_path.remove(frame.node);
        self.path.pop();
        self.depth.insert(frame.node.to_string(), frame.best);
        Some((frame.node, frame.best))
    }

    fn contribution(&self, source: &'g str, target: &'g str, target_depth: usize) -> usize {
        if self.cycle_edges.contains(&(source, target)) {
            target_depth
        } else {
            target_depth + 1
        }
    }

    fn record_cycle(&mut self, target: &'g str) {
        let Some(pos) = self.path.iter().position(|x| *x == target) else {
            return;
        };
        let members: Vec<&'g str> = self.path.iter().skip(pos).copied().collect();

        for (i, from) in members.iter().enumerate() {
            let to = members.get(i + 1).copied().unwrap_or(target);
            self.cycle_edges.insert((*from, to));
        }

        let cycle = Cycle::new(members.iter().map(ToString::to_string).collect());
        if self.seen_keys.insert(cycle.key()) {
            tracing::debug!(cycle = %cycle, "recorded dependency cycle");
            self.cycle_paths
                .entry(target.to_string())
                .or_insert_with(|| cycle.path_string());
            self.cycles.push(cycle);
        }
    }
}
