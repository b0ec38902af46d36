// src/session.rs
//! Cycle review session: which cycles the operator has marked resolved and
//! which unresolved cycle is current.
//!
//! Purely in-memory. Resolving a cycle never touches the graph or metrics.

use std::collections::HashSet;

use crate::graph::Cycle;

#[derive(Debug, Clone, Default)]
pub struct CycleSession {
    resolved: HashSet<String>,
    current: usize,
}

impl CycleSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycles whose key has not been marked resolved, in discovery order.
    #[must_use]
    pub fn unresolved<'c>(&self, cycles: &'c [Cycle]) -> Vec<&'c Cycle> {
        cycles
            .iter()
            .filter(|c| !self.resolved.contains(&c.key()))
            .collect()
    }

    /// Index into [`CycleSession::unresolved`], clamped to the current list.
    #[must_use]
    pub fn current_index(&self, cycles: &[Cycle]) -> usize {
        self.current
            .min(self.unresolved(cycles).len().saturating_sub(1))
    }

    #[must_use]
    pub fn current<'c>(&self, cycles: &'c [Cycle]) -> Option<&'c Cycle> {
        let unresolved = self.unresolved(cycles);
        unresolved.get(self.current_index(cycles)).copied()
    }

    /// Moves to the next unresolved cycle, stopping at the last one.
    pub fn next<'c>(&mut self, cycles: &'c [Cycle]) -> Option<&'c Cycle> {
        let last = self.unresolved(cycles).len().saturating_sub(1);
        self.current = (self.current + 1).min(last);
        self.current(cycles)
    }

    /// Marks the current cycle resolved and returns its key.
    ///
    /// The index is re-clamped so it points at the neighbouring cycle, or
    /// at 0 once nothing is left. Does nothing when every cycle is resolved.
    pub fn mark_current_resolved(&mut self, cycles: &[Cycle]) -> Option<String> {
        let key = self.current(cycles)?.key();
        self.resolved.insert(key.clone());

        let remaining = self.unresolved(cycles).len();
        self.current = self.current.min(remaining.saturating_sub(1));

        tracing::info!(cycle = %key, remaining, "marked cycle resolved");
        Some(key)
    }

    /// Marks a cycle resolved by key.
    pub fn resolve(&mut self, key: impl Into<String>) -> bool {
        self.resolved.insert(key.into())
    }

    #[must_use]
    pub fn is_resolved(&self, key: &str) -> bool {
        self.resolved.contains(key)
    }

    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }
}
