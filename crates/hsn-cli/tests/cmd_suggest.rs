//! Integration tests for `hsn suggest` and `hsn search`.
#![allow(clippy::expect_used)]

use std::io::Write as _;
use std::path::PathBuf;
use std::process::Command;

fn hsn_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("hsn");
    path
}

fn sample_dataset() -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(
        br#"{"records":[
            {"code":"01","description":"LIVE ANIMALS"},
            {"code":"0101","description":"LIVE HORSES, ASSES, MULES AND HINNIES"},
            {"code":"0102","description":"LIVE BOVINE ANIMALS"},
            {"code":"0901","description":"COFFEE, WHETHER OR NOT ROASTED"}
        ]}"#,
    )
    .expect("write dataset");
    f
}

fn data_arg(f: &tempfile::NamedTempFile) -> String {
    f.path().display().to_string()
}

#[test]
fn suggest_ranks_matching_description_first() {
    let dataset = sample_dataset();
    let out = Command::new(hsn_bin())
        .args(["suggest", "--data", &data_arg(&dataset), "live horses"])
        .output()
        .expect("run hsn suggest");
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    let first = stdout.lines().next().expect("at least one suggestion");
    assert!(first.starts_with("0101"), "first line: {first}");
}

#[test]
fn suggest_json_lines_carry_score_and_confidence() {
    let dataset = sample_dataset();
    let out = Command::new(hsn_bin())
        .args([
            "suggest",
            "--format",
            "json",
            "--data",
            &data_arg(&dataset),
            "coffee roasted",
        ])
        .output()
        .expect("run hsn suggest");
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8(out.stdout).expect("UTF-8 stdout");
    let first: serde_json::Value =
        serde_json::from_str(stdout.lines().next().expect("line")).expect("NDJSON line");
    assert_eq!(first["code"], "0901");
    assert!(first["score"].as_f64().expect("score") > 0.0);
    assert!(first["confidence"].is_string());
}

#[test]
fn suggest_unrelated_query_exits_0_with_no_output() {
    let dataset = sample_dataset();
    let out = Command::new(hsn_bin())
        .args(["suggest", "-q", "--data", &data_arg(&dataset), "zzzz qqqq"])
        .output()
        .expect("run hsn suggest");
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty(), "stdout must be empty");
}

#[test]
fn suggest_top_k_caps_results() {
    let dataset = sample_dataset();
    let out = Command::new(hsn_bin())
        .args([
            "suggest",
            "--data",
            &data_arg(&dataset),
            "--top-k",
            "1",
            "live animals",
        ])
        .output()
        .expect("run hsn suggest");
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 1, "stdout: {stdout}");
}

#[test]
fn search_matches_substring_case_insensitively() {
    let dataset = sample_dataset();
    let out = Command::new(hsn_bin())
        .args(["search", "--data", &data_arg(&dataset), "coffee"])
        .output()
        .expect("run hsn search");
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("0901"), "stdout: {stdout}");
    assert!(stdout.contains("COFFEE"), "stdout: {stdout}");
}

#[test]
fn search_limit_caps_hits() {
    let dataset = sample_dataset();
    let out = Command::new(hsn_bin())
        .args([
            "search",
            "--data",
            &data_arg(&dataset),
            "--limit",
            "2",
            "live",
        ])
        .output()
        .expect("run hsn search");
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 2, "stdout: {stdout}");
}
