// src/graph/cycles.rs
//! Dependency cycles discovered by the metrics traversal.
//!
//! A cycle is stored open (no repeated terminal element) in the order the
//! traversal walked it. Identity is the exact sequence, so rotations of the
//! same loop are different cycles.

use serde::{Deserialize, Serialize};

/// Separator used both for the identity key and the display path.
pub const PATH_SEPARATOR: &str = " -> ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    members: Vec<String>,
}

impl Cycle {
    #[must_use]
    pub fn new(members: Vec<String>) -> Self {
        Self { members }
    }

    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m == id)
    }

    /// Identity used for deduplication and for marking a cycle resolved.
    #[must_use]
    pub fn key(&self) -> String {
        self.members.join(PATH_SEPARATOR)
    }

    /// Human-readable closed path, e.g. `a -> b -> c -> a`.
    #[must_use]
    pub fn path_string(&self) -> String {
        match self.members.first() {
            Some(first) => format!("{}{PATH_SEPARATOR}{first}", self.key()),
            None => String::new(),
        }
    }

    /// Edges of the cycle in walk order, wrapping from the last member to the first.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        let n = self.members.len();
        (0..n).filter_map(move |i| {
            let from = self.members.get(i)?;
            let to = self.members.get((i + 1) % n)?;
            Some((from.as_str(), to.as_str()))
        })
    }
}

impl std::fmt::Display for Cycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path_string())
    }
}
