pub mod cli;
pub mod config;
pub mod error;
pub mod exit;
pub mod export;
pub mod graph;
pub mod policy;
pub mod reporting;
pub mod session;
pub mod view;
