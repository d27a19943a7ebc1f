//! Render subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_render_stdin() {
    cargo_bin_cmd!("markit")
        .arg("render")
        .write_stdin("# Title\n\n*hi* there\n")
        .assert()
        .success()
        .stdout("<h1>Title</h1>\n<p><em>hi</em> there</p>\n");
}

#[test]
fn test_render_file() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("doc.md");
    fs::write(&test_file, "- a\n- b\n").unwrap();

    cargo_bin_cmd!("markit")
        .args(["render", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n");
}

#[test]
fn test_render_options() {
    cargo_bin_cmd!("markit")
        .args(["render", "--xhtml", "--breaks", "--nofollow"])
        .write_stdin("[a](/u)\nb\n")
        .assert()
        .success()
        .stdout("<p><a href=\"/u\" rel=\"nofollow\">a</a><br />\nb</p>\n");
}

#[test]
fn test_render_lang_prefix() {
    cargo_bin_cmd!("markit")
        .args(["render", "--lang-prefix", "lang-"])
        .write_stdin("```sh\nls\n```\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("<code class=\"lang-sh\">"));
}

#[test]
fn test_render_invalid_utf8_input() {
    cargo_bin_cmd!("markit")
        .arg("render")
        .write_stdin(&b"a\xffb"[..])
        .assert()
        .success()
        .stdout("<p>a\u{FFFD}b</p>\n");
}
