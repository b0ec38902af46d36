// src/policy/layers.rs
//! Architectural layer classification from project tags.
//!
//! Dependencies may only flow from `app` down to `shared` and `lib`, and from
//! `shared` down to `lib`. Projects carrying none of the layer tags are
//! `unknown` and never violate a rule.

use serde::{Deserialize, Serialize};

use crate::graph::Project;

/// Layer of a project. Declaration order is classification priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    App,
    Shared,
    Lib,
    Unknown,
}

impl Layer {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Shared => "shared",
            Self::Lib => "lib",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A layering rule an edge can break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerRule {
    /// `shared` or `lib` depending on `app`.
    NoUpwardToApp,
    /// `lib` depending on `app` or `shared`.
    LibStaysAtBottom,
}

impl LayerRule {
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::NoUpwardToApp => "shared/lib projects must not depend on app projects",
            Self::LibStaysAtBottom => "lib projects must not depend on app or shared projects",
        }
    }
}

/// Tag names that place a project in each layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerTags {
    pub app: Vec<String>,
    pub shared: Vec<String>,
    pub lib: Vec<String>,
}

impl Default for LayerTags {
    fn default() -> Self {
        Self {
            app: vec!["app".to_string()],
            shared: vec!["shared".to_string()],
            lib: vec!["lib".to_string()],
        }
    }
}

impl LayerTags {
    /// Classifies by priority: app, then shared, then lib, else unknown.
    #[must_use]
    pub fn classify(&self, project: &Project) -> Layer {
        let tagged = |names: &[String]| names.iter().any(|n| project.has_tag(n));

        if tagged(&self.app) {
            return Layer::App;
        }
        if tagged(&self.shared) {
            return Layer::Shared;
        }
        if tagged(&self.lib) {
            return Layer::Lib;
        }
        Layer::Unknown
    }
}

/// Checks if an edge from `from` to `to` breaks a layering rule.
#[must_use]
pub fn check_layer_violation(from: Layer, to: Layer) -> Option<LayerRule> {
    match (from, to) {
        (Layer::Shared | Layer::Lib, Layer::App) => Some(LayerRule::NoUpwardToApp),
        (Layer::Lib, Layer::Shared) => Some(LayerRule::LibStaysAtBottom),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(tags: &[&str]) -> Project {
        Project::new("p", tags.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_priority_order() {
        let tags = LayerTags::default();
        assert_eq!(tags.classify(&project(&["lib", "app"])), Layer::App);
        assert_eq!(tags.classify(&project(&["lib", "shared"])), Layer::Shared);
        assert_eq!(tags.classify(&project(&["npm:x", "lib"])), Layer::Lib);
        assert_eq!(tags.classify(&project(&["scope:web"])), Layer::Unknown);
        assert_eq!(tags.classify(&project(&[])), Layer::Unknown);
    }

    #[test]
    fn test_custom_tag_names() {
        let tags = LayerTags {
            app: vec!["type:app".to_string()],
            shared: vec!["type:feature".to_string(), "type:ui".to_string()],
            lib: vec!["type:util".to_string()],
        };
        assert_eq!(tags.classify(&project(&["type:ui"])), Layer::Shared);
        assert_eq!(tags.classify(&project(&["app"])), Layer::Unknown);
    }

    #[test]
    fn test_violation_matrix() {
        use Layer::{App, Lib, Shared, Unknown};
        let cases = [
            (App, App, None),
            (App, Shared, None),
            (App, Lib, None),
            (Shared, App, Some(LayerRule::NoUpwardToApp)),
            (Shared, Shared, None),
            (Shared, Lib, None),
            (Lib, App, Some(LayerRule::NoUpwardToApp)),
            (Lib, Shared, Some(LayerRule::LibStaysAtBottom)),
            (Lib, Lib, None),
            (Unknown, App, None),
            (Lib, Unknown, None),
        ];
        for (from, to, expected) in cases {
            assert_eq!(check_layer_violation(from, to), expected, "{from} -> {to}");
        }
    }
}
