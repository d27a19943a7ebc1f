//! Parse subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_stdin() {
    cargo_bin_cmd!("markit")
        .arg("parse")
        .write_stdin("# Heading\n\nParagraph.")
        .assert()
        .success()
        .stdout(predicate::str::contains("HeadingOpen"))
        .stdout(predicate::str::contains("ParagraphOpen"));
}

#[test]
fn test_parse_file_as_json() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.md");
    fs::write(&test_file, "Some *emphasis*.\n").unwrap();

    let output = cargo_bin_cmd!("markit")
        .args(["parse", "--json", test_file.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tokens = json.as_array().unwrap();
    assert_eq!(tokens[0]["type"], "paragraph_open");
    assert_eq!(tokens[1]["type"], "inline");
    assert_eq!(tokens[1]["children"][1]["type"], "emphasis_open");
    assert_eq!(tokens[0]["map"], serde_json::json!([0, 1]));
}

#[test]
fn test_parse_empty_input() {
    cargo_bin_cmd!("markit")
        .args(["parse", "--json"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
}
