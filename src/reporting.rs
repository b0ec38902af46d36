// src/reporting.rs
//! Terminal output for the analysis views.

use colored::Colorize;

use crate::graph::{Cycle, Neighborhood, NodeRole};
use crate::policy::BreakSuggestion;
use crate::view::{format_score, ProjectRow, ProjectView, SelectionView, Summary};

/// One unresolved cycle with the edge suggested for removal.
pub struct CycleEntry<'a> {
    pub cycle: &'a Cycle,
    pub suggestion: BreakSuggestion,
    pub current: bool,
}

/// Prints the project table followed by the summary line.
pub fn print_project_view(view: &ProjectView) {
    if view.rows.is_empty() {
        println!("{}", "No projects match the current filters.".yellow());
        print_summary(&view.summary);
        return;
    }

    let width = view
        .rows
        .iter()
        .map(|r| r.id.len())
        .max()
        .unwrap_or(0)
        .max("Package".len());

    println!(
        "{:<width$}  {:>4}  {:>4}  {:>5}  {:<5}  {:>6}  {}",
        "Package".bold(),
        "Deps".bold(),
        "In".bold(),
        "Depth".bold(),
        "Cycle".bold(),
        "Score".bold(),
        "Tags".bold(),
    );
    for row in &view.rows {
        print_row(row, width);
    }
    print_summary(&view.summary);
}

fn print_row(row: &ProjectRow, width: usize) {
    let cycle = if row.in_cycle {
        format!("{:<5}", "yes").red()
    } else {
        format!("{:<5}", "no").green()
    };
    println!(
        "{:<width$}  {:>4}  {:>4}  {:>5}  {}  {:>6}  {}",
        row.id,
        row.dependencies,
        row.dependents,
        row.depth,
        cycle,
        format_score(row.modularity),
        row.tag_list().dimmed(),
    );
}

fn print_summary(summary: &Summary) {
    println!(
        "\n{} {} projects | {} with no dependencies | avg {} deps",
        "SUMMARY".cyan().bold(),
        summary.total,
        summary.no_dependencies,
        format_score(summary.avg_dependencies),
    );
    println!(
        "        {} with no dependents | avg {} dependents",
        summary.no_dependents,
        format_score(summary.avg_dependents),
    );
}

/// Prints the unresolved cycles and their suggested breaks.
pub fn print_cycles(entries: &[CycleEntry], total: usize) {
    let resolved = total - entries.len();
    println!(
        "\n{} {} found | {} resolved | {} remaining",
        "CYCLES".cyan().bold(),
        total,
        resolved.to_string().green(),
        format_count(entries.len()),
    );

    if entries.is_empty() {
        println!("{}", "  ✓ No unresolved dependency cycles.".green());
        return;
    }

    for (i, entry) in entries.iter().enumerate() {
        let marker = if entry.current { "▸".yellow() } else { " ".normal() };
        println!(
            "\n{} {} {}",
            marker,
            format!("#{}", i + 1).bold(),
            entry.cycle.path_string().red()
        );
        print_suggestion(&entry.suggestion);
    }
}

fn print_suggestion(suggestion: &BreakSuggestion) {
    let edge = format!("{} → {}", suggestion.from, suggestion.to);
    if suggestion.is_layer_violation() {
        println!("    break {} ({})", edge.red().bold(), suggestion.reason);
    } else {
        println!("    break {} {}", edge.yellow(), format!("({})", suggestion.reason).dimmed());
    }
}

fn format_count(n: usize) -> String {
    if n == 0 {
        n.to_string().green().to_string()
    } else {
        n.to_string().red().to_string()
    }
}

/// Prints one project's details and its one-hop neighborhood.
pub fn print_selection(selection: &SelectionView) {
    let row = &selection.project;
    println!("\n{} {}", "PROJECT".cyan().bold(), row.id.bold());
    println!("  dependencies: {}", row.dependencies);
    println!("  dependents:   {}", row.dependents);
    println!("  depth:        {}", row.depth);
    println!("  modularity:   {}", format_score(row.modularity));
    for path in &selection.cycles {
        println!("  cycle:        {}", path.red());
    }
    if !row.tags.is_empty() {
        println!("  tags:         {}", row.tag_list().dimmed());
    }

    print_role(&selection.neighborhood, NodeRole::Dependency, "DEPENDS ON");
    print_role(&selection.neighborhood, NodeRole::Dependent, "DEPENDED ON BY");
}

fn print_role(neighborhood: &Neighborhood, role: NodeRole, title: &str) {
    let nodes: Vec<_> = neighborhood.with_role(role).collect();
    if nodes.is_empty() {
        return;
    }
    println!("\n{}", title.yellow().bold());
    for node in nodes {
        if node.external {
            println!("  {} {}", node.id, "(external or missing)".dimmed());
        } else {
            println!("  {}", node.id);
        }
    }
}

/// Prints the tag picker contents.
pub fn print_tags(tags: &[&str]) {
    if tags.is_empty() {
        println!("{}", "No tags.".dimmed());
        return;
    }
    println!("{} {}", "TAGS".cyan().bold(), tags.len());
    for tag in tags {
        println!("  {tag}");
    }
}
