// src/cli/mod.rs
//! CLI command handlers.

pub mod args;
pub mod handlers;

pub use args::{Cli, Commands};

use anyhow::Result;

use crate::config::Config;
use crate::exit::PkgscopeExit;
use handlers::CycleArgs;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands, config: &Config) -> Result<PkgscopeExit> {
    match command {
        Commands::Analyze { graph, filters, json } => {
            handlers::handle_analyze(&graph, &filters, json, config)
        }
        Commands::Cycles {
            graph,
            resolve,
            advance,
            resolve_current,
            json,
        } => {
            let args = CycleArgs { resolve, advance, resolve_current, json };
            handlers::handle_cycles(&graph, &args, config)
        }
        Commands::Export { graph, filters, output } => {
            handlers::handle_export(&graph, &filters, output, config)
        }
        Commands::Show { graph, project, json } => {
            handlers::handle_show(&graph, &project, json, config)
        }
        Commands::Tags { graph, json } => handlers::handle_tags(&graph, json, config),
    }
}
