// src/policy/mod.rs
//! Layering policy: classify projects and pick cycle edges to break.

pub mod advisor;
pub mod layers;

pub use advisor::{Advisor, BreakReason, BreakSuggestion};
pub use layers::{check_layer_violation, Layer, LayerRule, LayerTags};
