// src/graph/mod.rs
//! Project graph model and the metrics derived from it.

pub mod analysis;
pub mod cycles;
pub mod metrics;
pub mod model;
pub mod neighborhood;

pub use analysis::Analysis;
pub use cycles::Cycle;
pub use metrics::GraphMetrics;
pub use model::{DependencyEdge, Project, ProjectGraph, EXTERNAL_TAG_PREFIX};
pub use neighborhood::{Neighborhood, NeighborEdge, NeighborNode, NodeRole};
