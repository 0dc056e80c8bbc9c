use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rhythm-schedule"))
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .env("APP_LOCALE", "en")
        .env("TIMEZONE", "Asia/Seoul")
        .env("DEFAULT_WORK_TYPE", "irregular")
        .env("SCHEDULE_FILE", "schedule.json")
        .args(args)
        .output()
        .expect("failed to run rhythm-schedule")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_allowed_lists_shift_types() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_cli(dir.path(), &["allowed", "fixed_night"]);
    assert!(output.status.success());
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines, vec!["night\tNight shift", "off\tDay off"]);

    let output = run_cli(dir.path(), &["allowed", "whatever"]);
    assert_eq!(stdout(&output).lines().count(), 4);
}

#[test]
fn test_apply_writes_snapshot() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_cli(dir.path(), &["apply", "2026-01-01", "2026-01-03", "night"]);
    assert!(output.status.success(), "{:?}", output);

    let output = run_cli(dir.path(), &["apply", "2026-01-02", "2026-01-02", "off"]);
    assert!(output.status.success(), "{:?}", output);

    let json = fs::read_to_string(dir.path().join("schedule.json")).unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        snapshot,
        serde_json::json!({
            "2026-01-01": "night",
            "2026-01-02": "off",
            "2026-01-03": "night",
        })
    );
}

#[test]
fn test_reversed_range_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_cli(dir.path(), &["apply", "2026-02-02", "2026-01-28", "day"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("end date cannot be before start date"));
    assert!(!dir.path().join("schedule.json").exists());
}

#[test]
fn test_cleanup_dry_run_then_apply() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("schedule.json"),
        r#"{"2026-04-01":"day","2026-04-02":"evening","2026-04-03":"night"}"#,
    )
    .unwrap();

    let output = run_cli(dir.path(), &["cleanup", "2shift"]);
    assert!(output.status.success(), "{:?}", output);
    assert!(stdout(&output).contains("1 invalid, 0 rewritten"));
    let json = fs::read_to_string(dir.path().join("schedule.json")).unwrap();
    assert!(json.contains("evening"));

    let output = run_cli(dir.path(), &["cleanup", "2shift", "--apply"]);
    assert!(output.status.success(), "{:?}", output);
    let json = fs::read_to_string(dir.path().join("schedule.json")).unwrap();
    assert!(!json.contains("evening"));
}

#[test]
fn test_format_time() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(dir.path(), &["format-time", "08:00:00"]);
    assert_eq!(stdout(&output).trim(), "08:00");
}

fn seed_snapshot(dir: &Path) {
    fs::write(
        dir.join("schedule.json"),
        r#"{"2026-01-01":"day","2026-01-03":"night","2026-01-05":"off"}"#,
    )
    .unwrap();
}

fn stdout_lines(output: &Output) -> Vec<String> {
    stdout(output).lines().map(str::to_string).collect()
}

#[test]
fn test_show_windows() {
    let dir = tempfile::tempdir().unwrap();
    seed_snapshot(dir.path());

    let output = run_cli(dir.path(), &["show"]);
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(
        stdout_lines(&output),
        vec![
            "2026-01-01: Day shift",
            "2026-01-03: Night shift",
            "2026-01-05: Day off"
        ]
    );

    let output = run_cli(dir.path(), &["show", "--from", "2026-01-02", "--to", "2026-01-04"]);
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(stdout_lines(&output), vec!["2026-01-03: Night shift"]);

    let output = run_cli(dir.path(), &["show", "--from", "2026-01-03"]);
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(
        stdout_lines(&output),
        vec!["2026-01-03: Night shift", "2026-01-05: Day off"]
    );

    let output = run_cli(dir.path(), &["show", "--to", "2026-01-02"]);
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(stdout_lines(&output), vec!["2026-01-01: Day shift"]);
}

#[test]
fn test_show_one_sided_window_past_stored_days_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    seed_snapshot(dir.path());

    let output = run_cli(dir.path(), &["show", "--from", "2026-02-01"]);
    assert!(output.status.success(), "{:?}", output);
    assert!(stdout(&output).is_empty());

    let output = run_cli(dir.path(), &["show", "--to", "2025-12-01"]);
    assert!(output.status.success(), "{:?}", output);
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_show_rejects_bad_bounds() {
    let dir = tempfile::tempdir().unwrap();

    // No snapshot yet, the bound is still validated
    let output = run_cli(dir.path(), &["show", "--from", "garbage"]);
    assert!(!output.status.success());

    seed_snapshot(dir.path());
    let output = run_cli(dir.path(), &["show", "--from", "2026-01-05", "--to", "2026-01-01"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("end date cannot be before start date"));
}

#[test]
fn test_check() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_cli(dir.path(), &["check", "2shift", "day"]);
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(stdout(&output).trim(), "true");

    let output = run_cli(dir.path(), &["check", "2shift", "evening"]);
    assert!(!output.status.success());
    assert_eq!(stdout(&output).trim(), "false");
}

#[test]
fn test_default_range_spans_a_week() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_cli(dir.path(), &["default-range"]);
    assert!(output.status.success(), "{:?}", output);

    let out = stdout(&output);
    let dates: Vec<NaiveDate> = out
        .split_whitespace()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
        .collect();
    assert_eq!(dates.len(), 2);
    assert_eq!((dates[1] - dates[0]).num_days(), 6);
}

#[test]
fn test_disallowed_apply_does_not_write() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_cli(
        dir.path(),
        &["apply", "--work-type", "fixed_night", "2026-01-01", "2026-01-03", "day"],
    );
    assert!(!output.status.success());
    assert!(!dir.path().join("schedule.json").exists());
}
