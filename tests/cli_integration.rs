//! CLI Integration Tests
//!
//! These tests verify that the CLI commands work correctly end-to-end.
//! They test the actual binary behavior, not just the library.
//!
//! Run with:
//! ```bash
//! cargo test --test cli_integration
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

/// Get the path to the built binary
fn dmap_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_dmap"))
}

/// Write a pairs file into `dir` and return its path
fn write_pairs(dir: &Path, pairs: &[(&str, &str)]) -> PathBuf {
    let path = dir.join("pairs.json");
    let json = serde_json::to_string(pairs).unwrap();
    std::fs::write(&path, json).unwrap();
    path
}

fn scenario_pairs(dir: &Path) -> PathBuf {
    write_pairs(dir, &[("alice", "wonderland"), ("bob", "builder")])
}

/// Run dmap command and return (stdout, stderr, success)
fn run_dmap(args: &[&str], pairs_path: &Path) -> (String, String, bool) {
    let output = Command::new(dmap_binary())
        .args(["-p", pairs_path.to_str().unwrap(), "-f", "json"])
        .args(args)
        .output()
        .expect("Failed to execute dmap");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

// ============================================================================
// Lookup Tests
// ============================================================================

#[test]
fn test_cli_get_a() {
    let dir = tempdir().unwrap();
    let pairs = scenario_pairs(dir.path());

    let (stdout, _stderr, success) = run_dmap(&["get-a", "alice"], &pairs);

    assert!(success, "get-a should succeed");
    assert!(stdout.contains("\"found\":true"), "should be found");
    assert!(
        stdout.contains("\"value\":\"wonderland\""),
        "should return the paired value, got: {}",
        stdout
    );
}

#[test]
fn test_cli_get_b() {
    let dir = tempdir().unwrap();
    let pairs = scenario_pairs(dir.path());

    let (stdout, _stderr, success) = run_dmap(&["get-b", "builder"], &pairs);

    assert!(success, "get-b should succeed");
    assert!(stdout.contains("\"value\":\"bob\""), "should return bob");
}

#[test]
fn test_cli_get_missing_fails() {
    let dir = tempdir().unwrap();
    let pairs = scenario_pairs(dir.path());

    let (stdout, _stderr, success) = run_dmap(&["get-a", "carol"], &pairs);

    assert!(!success, "get-a of an unknown value should fail");
    assert!(stdout.contains("\"found\":false"), "should report not found");
}

#[test]
fn test_cli_get_either_role() {
    let dir = tempdir().unwrap();
    let pairs = scenario_pairs(dir.path());

    let (stdout, _, success) = run_dmap(&["get", "alice"], &pairs);
    assert!(success);
    assert!(stdout.contains("\"value\":\"wonderland\""));

    let (stdout, _, success) = run_dmap(&["get", "wonderland"], &pairs);
    assert!(success);
    assert!(stdout.contains("\"value\":\"alice\""));
}

// ============================================================================
// Verify Tests
// ============================================================================

#[test]
fn test_cli_verify() {
    let dir = tempdir().unwrap();
    let pairs = scenario_pairs(dir.path());

    let (stdout, _, success) = run_dmap(&["verify", "alice", "wonderland"], &pairs);
    assert!(success, "matching pair should verify");
    assert!(stdout.contains("\"verified\":true"));

    let (stdout, _, success) = run_dmap(&["verify", "alice", "builder"], &pairs);
    assert!(!success, "mismatched pair should not verify");
    assert!(stdout.contains("\"verified\":false"));
}

// ============================================================================
// Inspection Tests
// ============================================================================

#[test]
fn test_cli_count() {
    let dir = tempdir().unwrap();
    let pairs = write_pairs(
        dir.path(),
        &[("a", "1"), ("b", "2"), ("c", "3"), ("a", "1")],
    );

    let (stdout, _, success) = run_dmap(&["count"], &pairs);

    assert!(success);
    assert!(stdout.contains("\"count\":3"), "duplicates count once");
}

#[test]
fn test_cli_dump() {
    let dir = tempdir().unwrap();
    let pairs = scenario_pairs(dir.path());

    let (stdout, _, success) = run_dmap(&["dump"], &pairs);

    assert!(success);
    assert!(stdout.contains("(\"alice\", \"wonderland\")"));
    assert!(stdout.contains("(\"bob\", \"builder\")"));
    assert!(stdout.lines().next().unwrap().starts_with("+ "));
}

#[test]
fn test_cli_fingerprint() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("none.json");

    // Fingerprinting does not need a pairs file.
    let (stdout, _, success) = run_dmap(&["fingerprint", "alice"], &missing);
    assert!(success);
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(json["fingerprint"].as_str().unwrap().len(), 40);

    let (stdout, _, success) = run_dmap(
        &["fingerprint", "alice", "--pair", "wonderland"],
        &missing,
    );
    assert!(success);
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(json["keys"].as_array().unwrap().len(), 20);
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_cli_missing_pairs_file_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("none.json");

    let (_stdout, stderr, success) = run_dmap(&["count"], &missing);

    assert!(!success);
    assert!(stderr.contains("Failed to read"), "got: {}", stderr);
}

#[test]
fn test_cli_capacity_error_is_reported() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{"level_capacity": 1}"#).unwrap();

    // With one entry per level, the second distinct pair overflows where it
    // diverges from the first.
    let owned: Vec<(String, String)> = (0..8)
        .map(|i| (format!("a{}", i), format!("b{}", i)))
        .collect();
    let borrowed: Vec<(&str, &str)> = owned
        .iter()
        .map(|(a, b)| (a.as_str(), b.as_str()))
        .collect();
    let pairs = write_pairs(dir.path(), &borrowed);

    let (_stdout, stderr, success) = run_dmap(
        &["-c", config.to_str().unwrap(), "count"],
        &pairs,
    );

    assert!(!success, "a full level should abort loading");
    assert!(stderr.contains("is full"), "got: {}", stderr);
}
