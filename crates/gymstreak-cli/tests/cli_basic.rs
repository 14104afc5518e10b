//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against `home` and return (code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_gymstreak"))
        .args(args)
        .env("GYMSTREAK_HOME", home)
        .env("TZ", "UTC")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_ok(home: &Path, args: &[&str]) -> String {
    let (code, stdout, stderr) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    serde_json::from_str(&run_ok(home, args)).expect("Failed to parse JSON output")
}

#[test]
fn test_checkins_build_a_streak() {
    let home = tempfile::tempdir().unwrap();
    for day in ["2024-01-01", "2024-01-02", "2024-01-03"] {
        let record = run_json(home.path(), &["checkin", "gym-1", "--at", &format!("{day}T12:00:00Z")]);
        assert_eq!(record["locationId"], "gym-1");
    }

    let stats = run_json(home.path(), &["stats", "--as-of", "2024-01-03"]);
    assert_eq!(stats["currentStreak"], 3);
    assert_eq!(stats["bestStreak"], 3);
    assert_eq!(stats["totalDays"], 3);

    assert_eq!(run_ok(home.path(), &["points", "show"]).trim(), "300");
}

#[test]
fn test_verbose_logs_tracker_events() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        home.path(),
        &["-v", "checkin", "gym-1", "--at", "2024-01-01T12:00:00Z"],
    );
    assert_eq!(code, 0, "{stderr}");
    assert!(stderr.contains("tracker event"), "{stderr}");
    assert!(stderr.contains("AttendanceRecorded"), "{stderr}");

    let (_, _, quiet) = run_cli(home.path(), &["points", "add", "10"]);
    assert!(!quiet.contains("tracker event"), "{quiet}");
}

#[test]
fn test_duplicate_checkin_fails() {
    let home = tempfile::tempdir().unwrap();
    run_ok(home.path(), &["checkin", "gym-1", "--at", "2024-01-01T08:00:00Z"]);
    let (code, _, stderr) = run_cli(home.path(), &["checkin", "gym-1", "--at", "2024-01-01T19:00:00Z"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Already checked in on 2024-01-01"), "{stderr}");
}

#[test]
fn test_expired_streak_shows_in_history() {
    let home = tempfile::tempdir().unwrap();
    for day in ["2024-01-01", "2024-01-02", "2024-01-03"] {
        run_ok(home.path(), &["checkin", "gym-1", "--at", &format!("{day}T12:00:00Z")]);
    }
    let history = run_json(home.path(), &["history", "--as-of", "2024-01-10"]);
    let runs = history.as_array().unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0]["start"], "2024-01-01");
    assert_eq!(runs[0]["end"], "2024-01-03");
    assert_eq!(runs[0]["days"], 3);
}

#[test]
fn test_protector_requires_points() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["protector", "use", "--date", "2024-01-02"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Insufficient points"), "{stderr}");

    assert_eq!(run_ok(home.path(), &["points", "add", "1000"]).trim(), "1000");
    let result = run_json(home.path(), &["protector", "use", "--date", "2024-01-02"]);
    assert_eq!(result["balance"], 0);

    let usage = run_json(home.path(), &["protector", "list"]);
    assert_eq!(usage["2024-01-02"], true);
}

#[test]
fn test_rest_days_set_and_show() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(home.path(), &["rest-days", "set", "7"]);
    assert_ne!(code, 0);

    run_ok(home.path(), &["rest-days", "set", "0", "6"]);
    let days = run_json(home.path(), &["rest-days", "show"]);
    assert_eq!(days, serde_json::json!([0, 6]));
}

#[test]
fn test_config_get_and_set() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(run_ok(home.path(), &["config", "get", "points.protector_cost"]).trim(), "1000");
    run_ok(home.path(), &["config", "set", "points.protector_cost", "500"]);
    assert_eq!(run_ok(home.path(), &["config", "get", "points.protector_cost"]).trim(), "500");

    let (code, _, _) = run_cli(home.path(), &["config", "get", "points.nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_locations_round_trip() {
    let home = tempfile::tempdir().unwrap();
    let gym = run_json(home.path(), &["location", "add", "Downtown", "--lat", "40.4168", "--lon", "-3.7038"]);
    let id = gym["id"].as_str().unwrap().to_string();

    let list = run_json(home.path(), &["location", "list"]);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "Downtown");
    assert_eq!(list[0]["id"], gym["id"]);

    run_ok(home.path(), &["location", "remove", &id]);
    let (code, _, _) = run_cli(home.path(), &["location", "remove", &id]);
    assert_ne!(code, 0);
}

#[test]
fn test_calendar_month() {
    let home = tempfile::tempdir().unwrap();
    run_ok(home.path(), &["checkin", "gym-1", "--at", "2024-01-02T12:00:00Z"]);
    run_ok(home.path(), &["rest-days", "set", "0"]);
    let marks = run_json(home.path(), &["calendar", "--month", "2024-01"]);
    assert_eq!(marks["2024-01-02"]["attended"], true);
    assert_eq!(marks["2024-01-07"]["rest"], true);
    assert!(marks.get("2024-01-03").is_none());
}

#[test]
fn test_reset_requires_confirmation() {
    let home = tempfile::tempdir().unwrap();
    run_ok(home.path(), &["points", "add", "50"]);
    let (code, _, _) = run_cli(home.path(), &["reset"]);
    assert_ne!(code, 0);
    assert_eq!(run_ok(home.path(), &["points", "show"]).trim(), "50");

    run_ok(home.path(), &["reset", "--yes"]);
    assert_eq!(run_ok(home.path(), &["points", "show"]).trim(), "0");
}
