//! CLI integration tests
//!
//! Each test writes a trace log into a scratch directory, runs the built
//! binary against it, and checks the rendered output.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn write_log(temp_dir: &TempDir, contents: &str) -> PathBuf {
    let path = temp_dir.path().join("trace.json");
    fs::write(&path, contents).unwrap();
    path
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tracelens"))
        .args(args)
        .output()
        .expect("failed to execute CLI")
}

const ARRAY_LOG: &str = r#"[
  { "name": "xs", "operation": "create_array", "content": [1], "timestamp": 1.0 },
  { "name": "xs", "operation": "append", "content": [1, 2], "timestamp": 2.0,
    "operation_details": { "code": "xs.append(2)" } },
  { "name": "xs", "operation": "final_state", "content": [1, 2], "timestamp": 3.0 }
]"#;

#[test]
fn test_steps_array_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_log(&temp_dir, ARRAY_LOG);

    let output = run(&["steps", "--input", log.to_str().unwrap(), "--family", "array"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(parsed["kind"], "array");
    // The redundant final state is collapsed; two steps remain.
    assert_eq!(parsed["entities"]["xs"]["snapshots"].as_array().unwrap().len(), 2);
}

#[test]
fn test_steps_array_summary_output() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_log(&temp_dir, ARRAY_LOG);

    let output = run(&[
        "steps",
        "--input",
        log.to_str().unwrap(),
        "--family",
        "array",
        "--format",
        "summary",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("### `xs`"));
    assert!(stdout.contains("step 1"));
    assert!(stdout.contains("step 2"));
}

#[test]
fn test_steps_accepts_backend_envelope() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_log(
        &temp_dir,
        r#"{
          "arrays": [
            { "name": "xs", "operation": "create_array", "content": [1], "timestamp": 1.0 }
          ],
          "trees": [],
          "graphs": []
        }"#,
    );

    let output = run(&["steps", "--input", log.to_str().unwrap(), "--family", "array"]);
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(parsed["entities"]["xs"].is_object());
}

#[test]
fn test_steps_tree_respects_shrink_tolerance_flag() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_log(
        &temp_dir,
        r#"[
          { "name": "root", "operation": "assign_node",
            "content": { "value": 1, "left": { "value": 2 }, "right": { "value": 3 } },
            "timestamp": 1.0 },
          { "name": "root", "operation": "observation",
            "content": { "value": 1 }, "timestamp": 2.0 }
        ]"#,
    );

    // Default tolerance suppresses the 1-node observation.
    let strict = run(&["steps", "--input", log.to_str().unwrap(), "--family", "tree"]);
    assert!(strict.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&strict.stdout).unwrap();
    assert_eq!(parsed["sequence"]["snapshots"].as_array().unwrap().len(), 1);

    // Tolerance 0 retains it.
    let lax = run(&[
        "steps",
        "--input",
        log.to_str().unwrap(),
        "--family",
        "tree",
        "--shrink-tolerance",
        "0",
    ]);
    assert!(lax.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&lax.stdout).unwrap();
    assert_eq!(parsed["sequence"]["snapshots"].as_array().unwrap().len(), 2);
}

#[test]
fn test_steps_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_log(&temp_dir, ARRAY_LOG);
    let out_path = temp_dir.path().join("steps.json");

    let output = run(&[
        "steps",
        "--input",
        log.to_str().unwrap(),
        "--family",
        "array",
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let written = fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed["kind"], "array");
}

#[test]
fn test_steps_shape_mismatch_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_log(
        &temp_dir,
        r#"[ { "name": "xs", "operation": "observation", "content": { "value": 1 }, "timestamp": 1.0 } ]"#,
    );

    let output = run(&["steps", "--input", log.to_str().unwrap(), "--family", "array"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_INCONSISTENT_SHAPE"));
}

#[test]
fn test_timeline_array_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_log(
        &temp_dir,
        r#"[
          { "name": "xs", "operation": "create_array", "content": [1], "timestamp": 1.0 },
          { "name": "ys", "operation": "create_array", "content": [9], "timestamp": 2.0 },
          { "name": "xs", "operation": "append", "content": [1, 2], "timestamp": 3.0 }
        ]"#,
    );

    let output = run(&["timeline", "--input", log.to_str().unwrap(), "--family", "array"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["timestamps"].as_array().unwrap().len(), 3);
    assert_eq!(parsed["rows"].as_array().unwrap().len(), 2);
}

#[test]
fn test_timeline_summary_renders_table() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_log(&temp_dir, ARRAY_LOG);

    let output = run(&[
        "timeline",
        "--input",
        log.to_str().unwrap(),
        "--family",
        "array",
        "--format",
        "summary",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("| entity |"));
    assert!(stdout.contains("`xs`"));
}

#[test]
fn test_missing_input_file_exits_nonzero() {
    let output = run(&["steps", "--input", "/nonexistent/trace.json", "--family", "array"]);
    assert!(!output.status.success());
}
