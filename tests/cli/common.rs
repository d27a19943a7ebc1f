//! Behavior shared by every subcommand: argument errors, config errors and
//! the exit status they produce.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_help_lists_subcommands() {
    cargo_bin_cmd!("markit")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("markit parses CommonMark"))
        .stdout(predicate::str::contains("parse").and(predicate::str::contains("render")));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("markit")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand_prints_usage() {
    cargo_bin_cmd!("markit")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_render_help_documents_options() {
    cargo_bin_cmd!("markit")
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--lang-prefix"))
        .stdout(predicate::str::contains("--nofollow"));
}

#[test]
fn test_missing_input_file() {
    cargo_bin_cmd!("markit")
        .args(["parse", "/nonexistent/path/to/file.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NotFound"));
}

#[test]
fn test_config_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("env.toml");
    fs::write(&config_file, "typographer = false\n").unwrap();

    cargo_bin_cmd!("markit")
        .env("MARKIT_CONFIG", &config_file)
        .arg("render")
        .write_stdin("a -- b\n")
        .assert()
        .success()
        .stdout("<p>a -- b</p>\n");
}

#[test]
fn test_unreadable_config_fails() {
    cargo_bin_cmd!("markit")
        .args(["render", "--config", "/nonexistent/markit.toml"])
        .write_stdin("x\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read config"));
}

#[test]
fn test_unknown_config_key_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("typo.toml");
    fs::write(&config_file, "linkfy = false\n").unwrap();

    cargo_bin_cmd!("markit")
        .args(["parse", "--config", config_file.to_str().unwrap()])
        .write_stdin("x\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field"));
}

#[test]
fn test_zero_nesting_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("zero.toml");
    fs::write(&config_file, "max-nesting = 0\n").unwrap();

    cargo_bin_cmd!("markit")
        .args(["render", "--config", config_file.to_str().unwrap()])
        .write_stdin("x\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max-nesting must be at least 1"));
}
