// src/export.rs
//! CSV export of the displayed project list.

use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::view::{format_score, ProjectRow, ProjectView};

pub const CSV_HEADER: &str =
    "Package,Dependencies,Dependents,Depth,In Cycle,Cycle Path,Modularity,Tags";

/// Default output file name.
pub const DEFAULT_EXPORT_FILE: &str = "package-analysis.csv";

/// Writes the header and one line per row, in view order.
///
/// # Errors
/// Returns error if the writer fails.
pub fn write_csv<W: Write>(out: &mut W, view: &ProjectView) -> io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for row in &view.rows {
        writeln!(out, "{}", format_row(row))?;
    }
    Ok(())
}

#[must_use]
pub fn to_csv_string(view: &ProjectView) -> String {
    let mut buf = Vec::new();
    // Vec<u8> writes are infallible.
    if write_csv(&mut buf, view).is_err() {
        return String::new();
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Writes the export to `path`, replacing any existing file.
///
/// # Errors
/// Returns error if the file cannot be written.
pub fn write_to(path: &Path, view: &ProjectView) -> Result<()> {
    fs::write(path, to_csv_string(view))
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = view.rows.len(), "exported project list");
    Ok(())
}

fn format_row(row: &ProjectRow) -> String {
    format!(
        "{},{},{},{},{},{},{},{}",
        escape(&row.id),
        row.dependencies,
        row.dependents,
        row.depth,
        if row.in_cycle { "Yes" } else { "No" },
        escape(row.cycle_path.as_deref().unwrap_or("")),
        format_score(row.modularity),
        quote(&row.tag_list()),
    )
}

/// The tags column is always quoted.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Other text columns are quoted only when they would split the row.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(quote(field))
    } else {
        Cow::Borrowed(field)
    }
}
