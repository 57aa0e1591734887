//! Integration tests for the logsync CLI binary.
//!
//! These tests exercise the compiled binary using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

/// Get a Command for the logsync binary
fn logsync_cmd(workspace: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("logsync"));
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--workspace")
        .arg(workspace);
    cmd
}

/// Workspace with `src/a.c` (20 lines) and `trace.log` pointing into it.
fn scenario() -> (TempDir, String) {
    let dir = tempdir().unwrap();
    let root = dir.path().to_string_lossy().into_owned();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    let source: String = (1..=20).map(|i| format!("line {i}\n")).collect();
    fs::write(dir.path().join("src/a.c"), source).unwrap();
    fs::write(
        dir.path().join("trace.log"),
        format!("{root}/src/a.c:10\n    asm0\n{root}/src/a.c:12\n"),
    )
    .unwrap();
    let source_path = format!("{root}/src/a.c");
    (dir, source_path)
}

// ============================================================================
// Help
// ============================================================================

#[test]
fn test_help_output() {
    let dir = tempdir().unwrap();
    logsync_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("logsync"))
        .stdout(predicate::str::contains("replay"));
}

#[test]
fn test_no_command_shows_help_hint() {
    let dir = tempdir().unwrap();
    logsync_cmd(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("logsync --help"));
}

// ============================================================================
// index
// ============================================================================

#[test]
fn test_index_lists_locations() {
    let (dir, source) = scenario();
    logsync_cmd(dir.path())
        .args(["index", "trace.log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(source))
        .stdout(predicate::str::contains("log 1-2"))
        .stdout(predicate::str::contains("log 3-3"))
        .stdout(predicate::str::contains("2 locations in 1 files"));
}

#[test]
fn test_index_json() {
    let (dir, source) = scenario();
    let output = logsync_cmd(dir.path())
        .args(["index", "trace.log", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[&source]["10"]["log_line"], 0);
    assert_eq!(json[&source]["10"]["span"], 2);
    assert_eq!(json[&source]["12"]["log_line"], 2);
    assert_eq!(json[&source]["12"]["span"], 1);
}

#[test]
fn test_index_uses_settings_file() {
    let (dir, _source) = scenario();
    fs::write(
        dir.path().join("logsync.toml"),
        "referenceFilePath = \"$workspaceRoot/trace.log\"\n",
    )
    .unwrap();

    logsync_cmd(dir.path())
        .arg("index")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 locations"));
}

#[test]
fn test_index_without_reference_fails() {
    let dir = tempdir().unwrap();
    logsync_cmd(dir.path())
        .arg("index")
        .assert()
        .failure()
        .stderr(predicate::str::contains("referenceFilePath"));
}

#[test]
fn test_index_missing_reference_fails() {
    let dir = tempdir().unwrap();
    logsync_cmd(dir.path())
        .args(["index", "missing.log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.log"));
}

#[test]
fn test_invalid_regex_is_reported() {
    let (dir, _source) = scenario();
    fs::write(dir.path().join("bad.toml"), "pathRegex = '^(.*):\\d+$'\n").unwrap();

    logsync_cmd(dir.path())
        .args(["index", "trace.log", "--config", "bad.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("capture groups"));
}

// ============================================================================
// lookup / resolve
// ============================================================================

#[test]
fn test_lookup_finds_block() {
    let (dir, source) = scenario();
    logsync_cmd(dir.path())
        .args(["lookup", "trace.log", &source, "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("log lines 1-2 (2 lines)"));
}

#[test]
fn test_lookup_miss_fails() {
    let (dir, source) = scenario();
    logsync_cmd(dir.path())
        .args(["lookup", "trace.log", &source, "11"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry"));
}

#[test]
fn test_lookup_untracked_file_fails() {
    let (dir, _source) = scenario();
    logsync_cmd(dir.path())
        .args(["lookup", "trace.log", "/elsewhere/b.c", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not mentioned"));
}

#[test]
fn test_resolve_walks_up_past_skipped_lines() {
    let (dir, source) = scenario();
    logsync_cmd(dir.path())
        .args(["resolve", "trace.log", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{source}:10")))
        .stdout(predicate::str::contains("from log line 1"));
}

#[test]
fn test_resolve_out_of_range_fails() {
    let (dir, _source) = scenario();
    logsync_cmd(dir.path())
        .args(["resolve", "trace.log", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside"));
}

// ============================================================================
// replay
// ============================================================================

#[test]
fn test_replay_syncs_both_directions() {
    let (dir, _source) = scenario();
    fs::write(
        dir.path().join("logsync.toml"),
        "referenceFilePath = \"trace.log\"\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("script.txt"),
        "# end to end\ntoggle\nselect src/a.c 10\nselect src/a.c 12\nbidi\nlog 2\ndisable\n",
    )
    .unwrap();

    logsync_cmd(dir.path())
        .args(["replay", "script.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode single"))
        .stdout(predicate::str::contains("reveal trace.log:1-2"))
        .stdout(predicate::str::contains("highlight a.c:10"))
        .stdout(predicate::str::contains("reveal trace.log:3"))
        .stdout(predicate::str::contains("synced source -> log"))
        .stdout(predicate::str::contains("mode bidirectional"))
        .stdout(predicate::str::contains("reveal a.c:10"))
        .stdout(predicate::str::contains("synced log -> source"))
        .stdout(predicate::str::contains("mode off"));
}

#[test]
fn test_replay_rejects_unknown_command() {
    let (dir, _source) = scenario();
    fs::write(dir.path().join("logsync.toml"), "referenceFilePath = \"trace.log\"\n").unwrap();
    fs::write(dir.path().join("script.txt"), "toggle\nfly away\n").unwrap();

    logsync_cmd(dir.path())
        .args(["replay", "script.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown script command"));
}

#[test]
fn test_replay_log_before_toggle_fails() {
    let (dir, _source) = scenario();
    fs::write(dir.path().join("logsync.toml"), "referenceFilePath = \"trace.log\"\n").unwrap();
    fs::write(dir.path().join("script.txt"), "log 1\n").unwrap();

    logsync_cmd(dir.path())
        .args(["replay", "script.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("run 'toggle' first"));
}
