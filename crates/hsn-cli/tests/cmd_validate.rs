//! Integration tests for `hsn validate`.
#![allow(clippy::expect_used)]

use std::io::Write as _;
use std::path::PathBuf;
use std::process::Command;

/// Path to the compiled `hsn` binary.
fn hsn_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("hsn");
    path
}

/// Writes a JSON dataset with "01", "0101", "010100" to a temp file.
fn sample_dataset() -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(
        br#"{"records":[
            {"code":"01","description":"LIVE ANIMALS"},
            {"code":"0101","description":"LIVE HORSES, ASSES, MULES AND HINNIES"},
            {"code":"010100","description":"LIVE HORSES"}
        ]}"#,
    )
    .expect("write dataset");
    f
}

fn data_arg(f: &tempfile::NamedTempFile) -> String {
    f.path().display().to_string()
}

#[test]
fn valid_code_exits_0_and_prints_description() {
    let dataset = sample_dataset();
    let out = Command::new(hsn_bin())
        .args(["validate", "--data", &data_arg(&dataset), "0101"])
        .output()
        .expect("run hsn validate");
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("VALID"), "stdout: {stdout}");
    assert!(stdout.contains("LIVE HORSES"), "stdout: {stdout}");
}

#[test]
fn invalid_code_exits_1() {
    let dataset = sample_dataset();
    let out = Command::new(hsn_bin())
        .args(["validate", "--data", &data_arg(&dataset), "010"])
        .output()
        .expect("run hsn validate");
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Invalid length 3"), "stdout: {stdout}");
}

#[test]
fn non_numeric_code_message() {
    let dataset = sample_dataset();
    let out = Command::new(hsn_bin())
        .args(["validate", "--data", &data_arg(&dataset), "ABCD"])
        .output()
        .expect("run hsn validate");
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Non-numeric characters detected"),
        "stdout: {stdout}"
    );
}

#[test]
fn absent_code_reports_not_found() {
    let dataset = sample_dataset();
    let out = Command::new(hsn_bin())
        .args(["validate", "--data", &data_arg(&dataset), "99999999"])
        .output()
        .expect("run hsn validate");
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Code not found in database"),
        "stdout: {stdout}"
    );
}

#[test]
fn mixed_batch_exits_1_with_per_code_lines() {
    let dataset = sample_dataset();
    let out = Command::new(hsn_bin())
        .args(["validate", "--data", &data_arg(&dataset), "0101", "010"])
        .output()
        .expect("run hsn validate");
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 2, "stdout: {stdout}");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("1 valid, 1 invalid"), "stderr: {stderr}");
}

#[test]
fn json_format_emits_ndjson() {
    let dataset = sample_dataset();
    let out = Command::new(hsn_bin())
        .args([
            "validate",
            "--format",
            "json",
            "--data",
            &data_arg(&dataset),
            "0101",
            "ABCD",
        ])
        .output()
        .expect("run hsn validate");
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8(out.stdout).expect("UTF-8 stdout");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "stdout: {stdout}");
    let first: serde_json::Value = serde_json::from_str(lines[0]).expect("NDJSON line");
    assert_eq!(first["valid"], true);
    assert_eq!(first["cleaned"], "0101");
    let second: serde_json::Value = serde_json::from_str(lines[1]).expect("NDJSON line");
    assert_eq!(second["valid"], false);
    assert_eq!(second["error"], "Non-numeric characters detected");
}

#[test]
fn batch_file_codes_are_validated() {
    let dataset = sample_dataset();
    let mut batch = tempfile::NamedTempFile::new().expect("create batch file");
    batch.write_all(b"01\n0101\n\n  010100  \n").expect("write batch");
    let out = Command::new(hsn_bin())
        .args([
            "validate",
            "--data",
            &data_arg(&dataset),
            "--batch",
            &batch.path().display().to_string(),
        ])
        .output()
        .expect("run hsn validate");
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 3, "stdout: {stdout}");
}

#[test]
fn no_codes_is_usage_error_exit_2() {
    let dataset = sample_dataset();
    let out = Command::new(hsn_bin())
        .args(["validate", "--data", &data_arg(&dataset)])
        .output()
        .expect("run hsn validate");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no codes"), "stderr: {stderr}");
}

#[test]
fn missing_dataset_file_exits_2() {
    let out = Command::new(hsn_bin())
        .args(["validate", "--data", "/no/such/dataset.json", "01"])
        .output()
        .expect("run hsn validate");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not found"), "stderr: {stderr}");
}

#[test]
fn empty_dataset_exits_2() {
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(br#"{"records":[]}"#).expect("write dataset");
    let out = Command::new(hsn_bin())
        .args(["validate", "--data", &f.path().display().to_string(), "01"])
        .output()
        .expect("run hsn validate");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no records"), "stderr: {stderr}");
}

#[test]
fn missing_parent_is_reported() {
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(
        br#"{"records":[
            {"code":"01","description":"LIVE ANIMALS"},
            {"code":"01010011","description":"PURE-BRED BREEDING HORSES"}
        ]}"#,
    )
    .expect("write dataset");
    let out = Command::new(hsn_bin())
        .args([
            "validate",
            "--data",
            &f.path().display().to_string(),
            "01010011",
        ])
        .output()
        .expect("run hsn validate");
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Missing parent codes: 0101, 010100"),
        "stdout: {stdout}"
    );
}

#[test]
fn quiet_suppresses_summary() {
    let dataset = sample_dataset();
    let out = Command::new(hsn_bin())
        .args(["validate", "-q", "--data", &data_arg(&dataset), "0101"])
        .output()
        .expect("run hsn validate");
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stderr.is_empty(), "stderr must be empty in quiet mode");
}
