//! CLI integration tests for mysql-clone.
//!
//! The binary has no flag surface; everything is driven through interactive
//! prompts, so these tests exercise the fatal paths reachable without a
//! terminal and assert the contract of exit code 1 on any fatal condition.

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a command for the mysql-clone binary.
fn cmd() -> Command {
    Command::cargo_bin("mysql-clone").unwrap()
}

#[test]
fn test_missing_default_config_exits_with_code_1() {
    // In an empty working directory the default ./config.json cannot exist;
    // whether the prompt accepts the default or fails on closed stdin, the
    // run must end with exit code 1 and an error on stderr.
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .current_dir(dir.path())
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn test_malformed_config_exits_with_code_1() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), "{ not json").unwrap();

    cmd()
        .current_dir(dir.path())
        .write_stdin("\n")
        .assert()
        .code(1)
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn test_invalid_config_shape_exits_with_code_1() {
    let dir = tempfile::tempdir().unwrap();
    // Valid JSON, but missing required sections
    std::fs::write(dir.path().join("config.json"), r#"{"source": {}}"#).unwrap();

    cmd()
        .current_dir(dir.path())
        .write_stdin("\n")
        .assert()
        .code(1)
        .stderr(predicate::str::is_empty().not());
}
