//! End-to-end tests for the `textgram` binary.
#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn grammar_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn textgram() -> Command {
    Command::cargo_bin("textgram").unwrap()
}

#[test]
fn test_valid_grammar_reports_summary() {
    let file = grammar_file(
        r#"{
            "start": {"seq": [{"ref": "word"}, {"opt": {"f": 0.5, "opt": {"lit": "."}}}]},
            "start_code": {"span": {"class": "ident", "span": {"ref": "word"}}},
            "word": {"alt": [{"lit": "cat"}, {"lit": "dog"}]}
        }"#,
    );

    textgram()
        .arg(file.path())
        .assert()
        .success()
        .stdout("ok: 3 rules, entry points: start, start_code\n");
}

#[test]
fn test_quiet_prints_nothing() {
    let file = grammar_file(r#"{"start": {"lit": "a"}}"#);

    textgram()
        .arg(file.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_unreferenced_rule_fails() {
    let file = grammar_file(r#"{"start": {"lit": "a"}, "orphan": {"lit": "b"}}"#);

    textgram()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unreferenced rule <orphan>"));
}

#[test]
fn test_unresolved_reference_fails() {
    let file = grammar_file(
        r#"{"start": {"cond": {"flag": "caps", "inv": true, "cond": {"ref": "missing"}}}}"#,
    );

    textgram()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid ref <missing> in rule <start>"));
}

#[test]
fn test_invalid_probability_fails() {
    let file = grammar_file(r#"{"start": {"opt": {"f": 1.5, "opt": {"lit": "a"}}}}"#);

    textgram()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "invalid opt probability 1.5 in rule <start>",
        ));
}

#[test]
fn test_malformed_node_fails() {
    let file = grammar_file(r#"{"start": {"repeat": {"lit": "a"}}}"#);

    textgram()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed grammar node"))
        .stderr(predicate::str::contains("\u{1b}").not());
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    textgram()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: failed to read"));
}
