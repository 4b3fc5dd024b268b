//! Smoke tests for the recto-viewer binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

/// Path to a fixture file.
fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn viewer_cmd() -> Command {
    Command::cargo_bin("recto-viewer").expect("binary should build")
}

#[test]
fn test_render_writes_output_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("article.html");

    viewer_cmd()
        .arg("render")
        .arg(fixture_path("article.xml"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Adaptive Sampling for Stream Summaries"))
        .stdout(predicate::str::contains("Footnotes: 2"))
        .stdout(predicate::str::contains("Saved to:"));

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h1>Adaptive Sampling for Stream Summaries</h1>"));
    assert!(html.contains(r#"<h2 id="introduction">Introduction</h2>"#));
}

#[test]
fn test_render_rejects_invalid_language() {
    viewer_cmd()
        .arg("render")
        .arg(fixture_path("article.xml"))
        .arg("--language")
        .arg("english!")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid language tag"));
}

#[test]
fn test_render_missing_file_fails() {
    viewer_cmd()
        .arg("render")
        .arg("no-such-file.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_tree_compact_prints_json() {
    let output = viewer_cmd()
        .arg("tree")
        .arg(fixture_path("article.xml"))
        .arg("--compact")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(parsed[0]["tag"], "TEI");
}

#[test]
fn test_tree_writes_output_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("tree.json");

    viewer_cmd()
        .arg("tree")
        .arg(fixture_path("article.xml"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to:"));

    let json = fs::read_to_string(&output).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0]["tag"], "TEI");
}

#[test]
fn test_info_prints_metadata() {
    viewer_cmd()
        .arg("info")
        .arg(fixture_path("article.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Adaptive Sampling for Stream Summaries"))
        .stdout(predicate::str::contains("Maria Keller, Jonas P Brandt"))
        .stdout(predicate::str::contains("Language: en"))
        .stdout(predicate::str::contains(
            "Published: Journal of Data Engineering, Aldine Press, 2024-03-18",
        ))
        .stdout(predicate::str::contains(
            "Keywords: data streams, sampling, sliding windows",
        ))
        .stdout(predicate::str::contains("We present an adaptive sampling scheme"));
}

#[test]
fn test_info_selects_requested_abstract_language() {
    viewer_cmd()
        .arg("info")
        .arg(fixture_path("article.xml"))
        .arg("--language")
        .arg("fr")
        .assert()
        .success()
        .stdout(predicate::str::contains("Abstract (fr)"))
        .stdout(predicate::str::contains("Nous présentons"));
}
