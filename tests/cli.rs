//! Command-line behaviour: arguments, exit codes and the JSON run report.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn letter_index() -> Command {
    Command::cargo_bin("letter-index").unwrap()
}

#[test]
fn test_missing_arguments_is_usage_error() {
    letter_index()
        .arg("2")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_zero_workers_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("manifest.txt");
    fs::write(&manifest, "0\n").unwrap();

    letter_index()
        .args(["0", "1"])
        .arg(&manifest)
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_unreadable_manifest_fails() {
    let dir = TempDir::new().unwrap();

    letter_index()
        .args(["1", "1"])
        .arg(dir.path().join("missing.txt"))
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error opening manifest"));
}

#[test]
fn test_successful_run_writes_letters_and_summary() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("one.txt");
    fs::write(&input, "Hello hello world").unwrap();
    let manifest = dir.path().join("manifest.txt");
    fs::write(&manifest, format!("1\n{}\n", input.display())).unwrap();
    let out = dir.path().join("out");
    let summary = dir.path().join("report.json");

    letter_index()
        .args(["2", "2"])
        .arg(&manifest)
        .arg("--output-dir")
        .arg(&out)
        .args(["--sync", "barrier"])
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(out.join("h.txt")).unwrap(), "hello:[1]\n");
    assert_eq!(fs::read_to_string(out.join("w.txt")).unwrap(), "world:[1]\n");

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(report["files_indexed"], 1);
    assert_eq!(report["words_indexed"], 2);
    assert_eq!(report["sync"], "barrier");
}

#[test]
fn test_strict_mode_fails_on_skipped_input() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("manifest.txt");
    fs::write(&manifest, format!("1\n{}\n", dir.path().join("absent.txt").display())).unwrap();
    let out = dir.path().join("out");

    letter_index()
        .args(["1", "1"])
        .arg(&manifest)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    letter_index()
        .args(["1", "1"])
        .arg(&manifest)
        .arg("--output-dir")
        .arg(&out)
        .arg("--strict")
        .assert()
        .failure()
        .code(1);
}
