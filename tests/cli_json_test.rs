//! Integration test: the `pkgscope` binary end to end.
//!
//! Each test runs in a temp directory holding the graph document, so the
//! default `pkgscope.toml` lookup and export path stay inside it.

use std::process::{Command, Output};
use tempfile::TempDir;

const GRAPH: &str = r#"{
    "nodes": {
        "web":  { "data": { "tags": ["app"] } },
        "ui":   { "data": { "tags": ["shared"] } },
        "util": { "data": { "tags": ["lib"] } }
    },
    "dependencies": {
        "web":  [{ "target": "ui" }],
        "ui":   [{ "target": "util" }],
        "util": [{ "target": "web" }]
    }
}"#;

fn workspace(graph: &str) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    std::fs::write(dir.path().join("graph.json"), graph).expect("failed to write graph.json");
    dir
}

fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pkgscope"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute pkgscope")
}

fn parse_stdout(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout is not valid JSON")
}

#[test]
fn analyze_json_lists_every_project() {
    let dir = workspace(GRAPH);
    let output = run(&dir, &["analyze", "graph.json", "--json"]);
    assert!(output.status.success());

    let value = parse_stdout(&output);
    let rows = value["rows"].as_array().expect("'rows' must be an array");
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r["in_cycle"] == true));
    assert_eq!(value["summary"]["total"], 3);
}

#[test]
fn analyze_filters_by_tag() {
    let dir = workspace(GRAPH);
    let output = run(&dir, &["analyze", "graph.json", "--json", "--tag", "lib"]);
    let value = parse_stdout(&output);
    let rows = value["rows"].as_array().expect("'rows' must be an array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "util");
}

#[test]
fn cycles_json_suggests_layer_violation() {
    let dir = workspace(GRAPH);
    let output = run(&dir, &["cycles", "graph.json", "--json"]);
    assert!(output.status.success());

    let value = parse_stdout(&output);
    assert_eq!(value["total"], 1);
    let first = &value["unresolved"][0];
    assert_eq!(first["key"], "web -> ui -> util");
    assert_eq!(first["suggestion"]["from"], "util");
    assert_eq!(first["suggestion"]["to"], "web");
    assert_eq!(first["suggestion"]["reason"]["kind"], "layering");
}

#[test]
fn fail_on_cycles_sets_exit_code() {
    let dir = workspace(GRAPH);
    std::fs::write(dir.path().join("pkgscope.toml"), "[check]\nfail_on_cycles = true\n")
        .expect("failed to write pkgscope.toml");

    let output = run(&dir, &["cycles", "graph.json", "--json"]);
    assert_eq!(output.status.code(), Some(3));

    let output = run(&dir, &["cycles", "graph.json", "--json", "--resolve", "web -> ui -> util"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(parse_stdout(&output)["unresolved"].as_array().map(Vec::len), Some(0));
}

#[test]
fn malformed_input_exits_with_invalid_input() {
    let dir = workspace(r#"{ "nodes": {} }"#);
    let output = run(&dir, &["analyze", "graph.json"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("dependencies"));
}

#[test]
fn missing_file_is_a_generic_error() {
    let dir = workspace(GRAPH);
    let output = run(&dir, &["analyze", "nope.json"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn export_writes_default_file() {
    let dir = workspace(GRAPH);
    let output = run(&dir, &["export", "graph.json"]);
    assert!(output.status.success());

    let csv = std::fs::read_to_string(dir.path().join("package-analysis.csv"))
        .expect("export file missing");
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with(
        "Package,Dependencies,Dependents,Depth,In Cycle,Cycle Path,Modularity,Tags"
    ));
}

#[test]
fn show_json_has_neighborhood() {
    let dir = workspace(GRAPH);
    let output = run(&dir, &["show", "graph.json", "ui", "--json"]);
    assert!(output.status.success());

    let value = parse_stdout(&output);
    assert_eq!(value["project"]["id"], "ui");
    assert_eq!(value["cycles"], serde_json::json!(["web -> ui -> util -> web"]));
    let nodes = value["neighborhood"]["nodes"].as_array().expect("nodes");
    assert_eq!(nodes.len(), 3);
}

#[test]
fn tags_json_lists_display_tags() {
    let dir = workspace(GRAPH);
    let output = run(&dir, &["tags", "graph.json", "--json"]);
    let value = parse_stdout(&output);
    assert_eq!(value, serde_json::json!(["app", "shared", "lib"]));
}
