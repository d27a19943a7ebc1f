//! Config discovery tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const INPUT: &str = "<b>x</b> \"q\"\n";

#[test]
fn test_defaults_without_config() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("doc.md");
    fs::write(&test_file, INPUT).unwrap();

    cargo_bin_cmd!("markit")
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .env("HOME", temp_dir.path())
        .args(["render", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("<p>&lt;b&gt;x&lt;/b&gt; “q”</p>\n");
}

#[test]
fn test_config_found_next_to_input() {
    let temp_dir = TempDir::new().unwrap();
    let docs = temp_dir.path().join("docs");
    fs::create_dir(&docs).unwrap();
    let test_file = docs.join("doc.md");
    fs::write(&test_file, INPUT).unwrap();
    fs::write(
        temp_dir.path().join(".markit.toml"),
        "html = true\ntypographer = false\n",
    )
    .unwrap();

    cargo_bin_cmd!("markit")
        .args(["render", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("<p><b>x</b> &quot;q&quot;</p>\n");
}

#[test]
fn test_explicit_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("custom.toml");
    fs::write(&config_file, "quotes = \"«»\"\n").unwrap();

    cargo_bin_cmd!("markit")
        .args(["render", "--config", config_file.to_str().unwrap()])
        .write_stdin("\"q\"\n")
        .assert()
        .success()
        .stdout("<p>«q»</p>\n");
}

#[test]
fn test_invalid_explicit_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.toml");
    fs::write(&config_file, "html = \"yes\"\n").unwrap();

    cargo_bin_cmd!("markit")
        .args(["render", "--config", config_file.to_str().unwrap()])
        .write_stdin("x\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}
