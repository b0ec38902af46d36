// src/cli/handlers.rs
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::args::FilterArgs;
use crate::config::Config;
use crate::exit::PkgscopeExit;
use crate::export;
use crate::graph::{Analysis, Cycle};
use crate::policy::{Advisor, BreakSuggestion};
use crate::reporting::{self, CycleEntry};
use crate::session::CycleSession;
use crate::view::{FilterCriteria, ProjectView, SelectionView};

/// Loads and analyzes the graph document at `path`.
///
/// # Errors
/// Returns error if the file cannot be read or is not a valid graph document.
pub fn load_analysis(path: &Path, config: &Config) -> Result<Analysis> {
    let analysis = Analysis::load(path, config.display.hidden_tag_prefixes.clone())
        .with_context(|| format!("Failed to load project graph from {}", path.display()))?;
    tracing::debug!(
        projects = analysis.graph().len(),
        edges = analysis.graph().edge_count(),
        cycles = analysis.metrics().cycles().len(),
        "analysis complete"
    );
    Ok(analysis)
}

/// Handles the analyze command.
///
/// # Errors
/// Returns error if loading or serialization fails.
pub fn handle_analyze(
    graph: &Path,
    filters: &FilterArgs,
    json: bool,
    config: &Config,
) -> Result<PkgscopeExit> {
    let analysis = load_analysis(graph, config)?;
    let view = ProjectView::build(&analysis, &filters.to_criteria());

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        reporting::print_project_view(&view);
    }
    Ok(PkgscopeExit::Success)
}

#[derive(Serialize)]
struct CycleReport<'a> {
    total: usize,
    resolved: usize,
    current: Option<String>,
    unresolved: Vec<CycleItem<'a>>,
}

#[derive(Serialize)]
struct CycleItem<'a> {
    key: String,
    path: String,
    members: &'a [String],
    suggestion: BreakSuggestion,
}

/// Options for the cycles command.
#[derive(Debug, Clone, Default)]
pub struct CycleArgs {
    pub resolve: Vec<String>,
    pub advance: usize,
    pub resolve_current: bool,
    pub json: bool,
}

/// Handles the cycles command.
///
/// # Errors
/// Returns error if loading fails or a cycle is empty.
pub fn handle_cycles(graph: &Path, args: &CycleArgs, config: &Config) -> Result<PkgscopeExit> {
    let analysis = load_analysis(graph, config)?;
    let cycles = analysis.metrics().cycles();
    let session = replay_session(cycles, args);

    let advisor = Advisor::new(analysis.graph(), analysis.metrics(), &config.policy);
    let current = session.current(cycles).map(Cycle::key);
    let unresolved = session.unresolved(cycles);

    let mut entries = Vec::with_capacity(unresolved.len());
    for cycle in unresolved {
        entries.push(CycleEntry {
            cycle,
            suggestion: advisor.suggest_link_to_break(cycle)?,
            current: current.as_deref() == Some(cycle.key().as_str()),
        });
    }

    if args.json {
        let report = CycleReport {
            total: cycles.len(),
            resolved: cycles.len() - entries.len(),
            current,
            unresolved: entries
                .iter()
                .map(|e| CycleItem {
                    key: e.cycle.key(),
                    path: e.cycle.path_string(),
                    members: e.cycle.members(),
                    suggestion: e.suggestion.clone(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        reporting::print_cycles(&entries, cycles.len());
    }

    if config.check.fail_on_cycles && !entries.is_empty() {
        return Ok(PkgscopeExit::CyclesFound);
    }
    Ok(PkgscopeExit::Success)
}

fn replay_session(cycles: &[Cycle], args: &CycleArgs) -> CycleSession {
    let mut session = CycleSession::new();
    for key in &args.resolve {
        if !cycles.iter().any(|c| &c.key() == key) {
            tracing::warn!(cycle = %key, "no cycle with this key");
        }
        session.resolve(key.clone());
    }
    for _ in 0..args.advance {
        session.next(cycles);
    }
    if args.resolve_current {
        session.mark_current_resolved(cycles);
    }
    session
}

/// Handles the export command.
///
/// # Errors
/// Returns error if loading or writing fails.
pub fn handle_export(
    graph: &Path,
    filters: &FilterArgs,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<PkgscopeExit> {
    let analysis = load_analysis(graph, config)?;
    let view = ProjectView::build(&analysis, &filters.to_criteria());
    let path = output.unwrap_or_else(|| PathBuf::from(&config.export.path));

    export::write_to(&path, &view)?;
    println!("Exported {} projects to {}", view.rows.len(), path.display());
    Ok(PkgscopeExit::Success)
}

/// Handles the show command.
///
/// # Errors
/// Returns error if loading fails or the project is unknown.
pub fn handle_show(
    graph: &Path,
    project: &str,
    json: bool,
    config: &Config,
) -> Result<PkgscopeExit> {
    let analysis = load_analysis(graph, config)?;
    let mut criteria = FilterCriteria::new();
    criteria.select(Some(project.to_string()));

    let selection = SelectionView::build(&analysis, &criteria)?
        .ok_or_else(|| anyhow!("No project selected"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&selection)?);
    } else {
        reporting::print_selection(&selection);
    }
    Ok(PkgscopeExit::Success)
}

/// Handles the tags command.
///
/// # Errors
/// Returns error if loading fails.
pub fn handle_tags(graph: &Path, json: bool, config: &Config) -> Result<PkgscopeExit> {
    let analysis = load_analysis(graph, config)?;
    let tags = analysis.graph().all_tags();

    if json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
    } else {
        reporting::print_tags(&tags);
    }
    Ok(PkgscopeExit::Success)
}
