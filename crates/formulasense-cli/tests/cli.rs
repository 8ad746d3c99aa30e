use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

const SCHEMA: &str = r#"{
  "customer": {
    "columns": [
      { "name": "id", "dataType": "integer" },
      { "name": "first_name", "dataType": "text" }
    ],
    "directRelationships": [
      { "relationshipName": "assigned_rep_id", "targetTableName": "rep", "joinColumn": "assigned_rep_id" }
    ]
  },
  "rep": {
    "columns": [
      { "name": "name", "dataType": "text" },
      { "name": "region", "dataType": "text" }
    ]
  }
}"#;

/// `rep` points at a table the document never declares.
const DANGLING_SCHEMA: &str = r#"{
  "rep": {
    "columns": [{ "name": "name" }],
    "directRelationships": [{ "relationshipName": "office_id", "targetTableName": "office" }]
  }
}"#;

fn write_schema(dir: &Path, content: &str) -> String {
    let path = dir.join("schema.json");
    std::fs::write(&path, content).expect("write schema");
    path.to_str().expect("schema path").to_string()
}

fn formulasense(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_formulasense"))
        .args(args)
        .output()
        .expect("run CLI")
}

#[test]
fn test_complete_relationship_navigation_json() {
    let dir = tempdir().expect("temp dir");
    let schema = write_schema(dir.path(), SCHEMA);

    let output = formulasense(&[
        "complete",
        "-s",
        &schema,
        "-t",
        "customer",
        "-f",
        "json",
        "--compact",
        "assigned_rep_id_rel.|",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Expected exit 0, got: {stdout}");
    assert!(stdout.contains(r#""label":"name""#), "missing rep column: {stdout}");
    assert!(stdout.contains(r#""label":"region""#), "missing rep column: {stdout}");
    assert!(
        !stdout.contains(r#""label":"first_name""#),
        "customer column leaked into navigation: {stdout}"
    );
}

#[test]
fn test_complete_table_output() {
    let dir = tempdir().expect("temp dir");
    let schema = write_schema(dir.path(), SCHEMA);

    let output = formulasense(&["complete", "-s", &schema, "-t", "customer", "first"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Expected exit 0, got: {stdout}");
    assert!(stdout.contains("first_name"), "Expected first_name: {stdout}");
    assert!(stdout.contains("Identifier"), "Expected context kind: {stdout}");
}

#[test]
fn test_complete_reads_stdin() {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(env!("CARGO_BIN_EXE_formulasense"))
        .args(["complete", "-t", "customer", "-f", "json", "--compact"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn CLI");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"ROU\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait CLI");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Expected exit 0, got: {stdout}");
    assert!(stdout.contains(r#""label":"ROUND""#), "Expected ROUND: {stdout}");
}

#[test]
fn test_check_reports_unresolved_relationship() {
    let dir = tempdir().expect("temp dir");
    let schema = write_schema(dir.path(), SCHEMA);

    let output = formulasense(&[
        "check",
        "-s",
        &schema,
        "-t",
        "customer",
        "assigned_rep_id_rel.office_rel.name",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        output.status.code(),
        Some(1),
        "Expected exit 1, got: {stdout}"
    );
    assert!(
        stdout.contains("UNRESOLVED_RELATIONSHIP"),
        "Expected UNRESOLVED_RELATIONSHIP: {stdout}"
    );
}

#[test]
fn test_check_clean_formula() {
    let dir = tempdir().expect("temp dir");
    let schema = write_schema(dir.path(), SCHEMA);

    let output = formulasense(&[
        "check",
        "-s",
        &schema,
        "-t",
        "customer",
        "CONCAT(first_name, assigned_rep_id_rel.name)",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Expected exit 0, got: {stdout}");
    assert!(stdout.contains("no issues"), "Expected no issues: {stdout}");
}

#[test]
fn test_resolve_chain() {
    let dir = tempdir().expect("temp dir");
    let schema = write_schema(dir.path(), SCHEMA);

    let output = formulasense(&[
        "resolve",
        "-s",
        &schema,
        "-t",
        "customer",
        "-f",
        "json",
        "assigned_rep_id_rel.",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Expected exit 0, got: {stdout}");
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(value["target"], "rep");
    assert_eq!(value["hops"][0]["relationship"], "assigned_rep_id");
}

#[test]
fn test_resolve_broken_chain_fails() {
    let dir = tempdir().expect("temp dir");
    let schema = write_schema(dir.path(), SCHEMA);

    let output = formulasense(&["resolve", "-s", &schema, "-t", "rep", "assigned_rep_id_rel."]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(1), "Expected exit 1: {stdout}");
    assert!(stdout.contains("unresolved"), "Expected unresolved hop: {stdout}");
}

#[test]
fn test_hover_relationship() {
    let dir = tempdir().expect("temp dir");
    let schema = write_schema(dir.path(), SCHEMA);

    let output = formulasense(&[
        "hover",
        "-s",
        &schema,
        "-t",
        "customer",
        "--cursor",
        "3",
        "assigned_rep_id_rel.name",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Expected exit 0, got: {stdout}");
    assert!(stdout.contains("→ `rep`"), "Expected target table: {stdout}");
}

#[test]
fn test_describe_table() {
    let dir = tempdir().expect("temp dir");
    let schema = write_schema(dir.path(), SCHEMA);

    let output = formulasense(&["describe", "-s", &schema, "rep"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Expected exit 0, got: {stdout}");
    assert!(stdout.contains("region"), "Expected columns: {stdout}");
    assert!(stdout.contains("Incoming:"), "Expected incoming: {stdout}");
}

#[test]
fn test_describe_unknown_table_is_config_error() {
    let dir = tempdir().expect("temp dir");
    let schema = write_schema(dir.path(), SCHEMA);

    let output = formulasense(&["describe", "-s", &schema, "office"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(66), "Expected exit 66: {stderr}");
    assert!(stderr.contains("formulasense: error:"), "Expected error: {stderr}");
}

#[test]
fn test_validate_schema_dangling_target() {
    let dir = tempdir().expect("temp dir");
    let schema = write_schema(dir.path(), DANGLING_SCHEMA);

    let output = formulasense(&["validate-schema", "-s", &schema]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(1), "Expected exit 1: {stdout}");
    assert!(
        stdout.contains("DANGLING_RELATIONSHIP_TARGET"),
        "Expected dangling target: {stdout}"
    );
}

#[test]
fn test_validate_schema_requires_schema() {
    let output = formulasense(&["validate-schema"]);
    assert_eq!(output.status.code(), Some(66));
}

#[test]
fn test_invalid_schema_is_config_error() {
    let dir = tempdir().expect("temp dir");
    let schema = write_schema(dir.path(), "{ not json");

    let output = formulasense(&["complete", "-s", &schema, "-t", "customer", "id"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(66), "Expected exit 66: {stderr}");
    assert!(
        stderr.contains("Failed to load schema"),
        "Expected load error: {stderr}"
    );
}

#[test]
fn test_json_schema_command() {
    let output = formulasense(&["json-schema", "-f", "json"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Expected exit 0, got: {stdout}");
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert!(value.get("Schema").is_some());
    assert!(value.get("CompletionRequest").is_some());
}

#[test]
fn test_output_file() {
    let dir = tempdir().expect("temp dir");
    let schema = write_schema(dir.path(), SCHEMA);
    let out_path = dir.path().join("out.json");

    let output = formulasense(&[
        "complete",
        "-s",
        &schema,
        "-t",
        "customer",
        "-f",
        "json",
        "-o",
        out_path.to_str().expect("out path"),
        "na",
    ]);

    assert!(output.status.success());
    let written = std::fs::read_to_string(&out_path).expect("read output");
    assert!(written.contains("\"items\""));
}
