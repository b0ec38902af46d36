// src/graph/model.rs
//! Normalized in-memory project graph.
//!
//! The raw document is a JSON object with two required collections:
//! `nodes` (id -> `{ "data": { "tags": [...] } }`) and `dependencies`
//! (source id -> ordered list of `{ "target": id }`). Edge targets that are
//! not present in `nodes` are kept as external/missing references.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use crate::error::{GraphError, Result};

/// Tags with this prefix are package-manager noise and hidden from display.
pub const EXTERNAL_TAG_PREFIX: &str = "npm:";

/// A project in the workspace graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub tags: Vec<String>,
}

impl Project {
    #[must_use]
    pub fn new(id: impl Into<String>, tags: Vec<String>) -> Self {
        Self { id: id.into(), tags }
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A "depends on" edge. Duplicates are distinct edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
}

impl DependencyEdge {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(deserialize_with = "ordered_entries")]
    nodes: Vec<(String, RawNode)>,
    #[serde(deserialize_with = "ordered_entries")]
    dependencies: Vec<(String, Vec<RawDependency>)>,
}

#[derive(Deserialize, Default)]
struct RawNode {
    #[serde(default)]
    data: RawNodeData,
}

#[derive(Deserialize, Default)]
struct RawNodeData {
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Deserialize)]
struct RawDependency {
    target: String,
}

/// Reads a JSON object as key/value pairs in document order.
fn ordered_entries<'de, D, V>(
    deserializer: D,
) -> std::result::Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor(PhantomData))
}

/// The project graph: projects keyed by id plus ordered edge lists keyed by source.
///
/// Projects and edge lists keep the order they were added in, which for a
/// loaded document is the document's key order. Immutable once built; every
/// analysis borrows it.
#[derive(Debug, Clone)]
pub struct ProjectGraph {
    projects: Vec<Project>,
    project_index: HashMap<String, usize>,
    dependencies: Vec<(String, Vec<DependencyEdge>)>,
    source_index: HashMap<String, usize>,
    hidden_tag_prefixes: Vec<String>,
}

impl Default for ProjectGraph {
    fn default() -> Self {
        Self {
            projects: Vec::new(),
            project_index: HashMap::new(),
            dependencies: Vec::new(),
            source_index: HashMap::new(),
            hidden_tag_prefixes: vec![EXTERNAL_TAG_PREFIX.to_string()],
        }
    }
}

impl ProjectGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a graph document from JSON text.
    ///
    /// # Errors
    /// Returns `GraphError::Json` for invalid JSON and
    /// `GraphError::MalformedInput` when `nodes` or `dependencies` is absent.
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_document(value)
    }

    /// Normalizes an already-parsed document.
    ///
    /// # Errors
    /// Returns `GraphError::MalformedInput` when a required collection is
    /// missing or null, and `GraphError::Json` when a collection has the wrong shape.
    pub fn from_document(document: Value) -> Result<Self> {
        require_collection(&document, "nodes")?;
        require_collection(&document, "dependencies")?;

        let raw: RawDocument = serde_json::from_value(document)?;
        let mut graph = Self::new();

        for (id, node) in raw.nodes {
            graph.add_project(Project::new(id, node.data.tags));
        }
        for (source, deps) in raw.dependencies {
            for dep in deps {
                graph.add_edge(source.clone(), dep.target);
            }
        }

        tracing::debug!(
            projects = graph.len(),
            edges = graph.edge_count(),
            "normalized project graph"
        );
        Ok(graph)
    }

    /// Reads and parses a graph document from disk.
    ///
    /// # Errors
    /// Returns `GraphError::Io` if the file cannot be read, otherwise the
    /// errors of [`ProjectGraph::from_json`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        let graph = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), projects = graph.len(), "loaded project graph");
        Ok(graph)
    }

    /// Replaces the tag prefixes treated as hidden noise.
    #[must_use]
    pub fn with_hidden_tag_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.hidden_tag_prefixes = prefixes;
        self
    }

    /// Adds a project. Re-adding an id replaces it in its original position.
    pub fn add_project(&mut self, project: Project) {
        match self.project_index.get(&project.id) {
            Some(&i) => self.projects[i] = project,
            None => {
                self.project_index.insert(project.id.clone(), self.projects.len());
                self.projects.push(project);
            }
        }
    }

    pub fn add_edge(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let edge = DependencyEdge::new(source, target);
        let slot = match self.source_index.get(&edge.source) {
            Some(&i) => i,
            None => {
                let i = self.dependencies.len();
                self.source_index.insert(edge.source.clone(), i);
                self.dependencies.push((edge.source.clone(), Vec::new()));
                i
            }
        };
        self.dependencies[slot].1.push(edge);
    }

    #[must_use]
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.project_index.get(id).map(|&i| &self.projects[i])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.project_index.contains_key(id)
    }

    /// Projects in insertion order.
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn project_ids(&self) -> impl Iterator<Item = &str> {
        self.projects.iter().map(|p| p.id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Outgoing edges of `id` in insertion order.
    #[must_use]
    pub fn edges_from(&self, id: &str) -> &[DependencyEdge] {
        self.source_index
            .get(id)
            .map_or(&[][..], |&i| self.dependencies[i].1.as_slice())
    }

    #[must_use]
    pub fn outgoing_count(&self, id: &str) -> usize {
        self.edges_from(id).len()
    }

    /// Every edge, grouped by source in insertion order.
    pub fn all_edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.dependencies.iter().flat_map(|(_, edges)| edges)
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.dependencies.iter().map(|(_, edges)| edges.len()).sum()
    }

    /// Sources with at least one edge into `id`, each listed once.
    #[must_use]
    pub fn dependents_of(&self, id: &str) -> Vec<&str> {
        self.dependencies
            .iter()
            .filter(|(_, edges)| edges.iter().any(|e| e.target == id))
            .map(|(source, _)| source.as_str())
            .collect()
    }

    #[must_use]
    pub fn is_hidden_tag(&self, tag: &str) -> bool {
        self.hidden_tag_prefixes
            .iter()
            .any(|prefix| tag.starts_with(prefix.as_str()))
    }

    /// Tags of `id` with hidden (`npm:`) tags removed; empty for unknown ids.
    #[must_use]
    pub fn display_tags(&self, id: &str) -> Vec<&str> {
        self.project(id)
            .map(|p| {
                p.tags
                    .iter()
                    .map(String::as_str)
                    .filter(|t| !self.is_hidden_tag(t))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Distinct display tags across all projects, in first-seen order.
    #[must_use]
    pub fn all_tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.projects
            .iter()
            .flat_map(|p| p.tags.iter().map(String::as_str))
            .filter(|t| !self.is_hidden_tag(t))
            .filter(|t| seen.insert(*t))
            .collect()
    }
}

fn require_collection(document: &Value, key: &'static str) -> Result<()> {
    match document.get(key) {
        Some(value) if !value.is_null() => Ok(()),
        _ => Err(GraphError::MalformedInput { missing: key }),
    }
}
