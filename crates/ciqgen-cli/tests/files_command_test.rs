//! Integration tests for the files subcommands and JSON output mode

use std::path::PathBuf;
use std::process::Command;

fn ciqgen_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove 'deps' directory
    path.push("ciqgen");
    path
}

#[test]
fn test_files_list_json_output_is_valid() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("BSC1_G2L_20250101_000000.txt"), "RLUMP;").unwrap();

    let output = Command::new(ciqgen_bin())
        .args(["--json", "files", "list"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");

    let data = parsed.get("data").expect("Should have data field");
    assert_eq!(data.as_array().map(|a| a.len()), Some(1));
    assert_eq!(
        data[0].get("name").and_then(|v| v.as_str()),
        Some("BSC1_G2L_20250101_000000.txt")
    );
}

#[test]
fn test_files_delete_with_yes_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("stale.txt");
    std::fs::write(&target, "old").unwrap();

    let output = Command::new(ciqgen_bin())
        .args(["files", "delete", "stale.txt", "--yes"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    assert!(!target.exists(), "File should be deleted");
}

#[test]
fn test_files_delete_refuses_path_components() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(ciqgen_bin())
        .args(["files", "delete", "../escape.txt", "--yes"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should fail");
}

#[test]
fn test_missing_workbook_is_an_error() {
    let output = Command::new(ciqgen_bin())
        .args(["cells", "/nonexistent/relations.xlsx"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("relations.xlsx"), "Error should name the workbook");
}
