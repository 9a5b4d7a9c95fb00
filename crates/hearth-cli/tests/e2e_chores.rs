//! E2E CLI workflow tests.
//!
//! Each test runs the `hearth` binary as a subprocess against a database in
//! an isolated temp directory and asserts on the JSON contract.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the hearth binary with an isolated database.
fn hearth_cmd(db: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("hearth"));
    cmd.arg("--db").arg(db);
    // Suppress tracing output that goes to stderr
    cmd.env("HEARTH_LOG", "error");
    cmd.env_remove("HEARTH_DB");
    cmd.env_remove("FORMAT");
    cmd
}

fn temp_db() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db = dir.path().join("hearth.db");
    (dir, db)
}

/// Run a subcommand with `--json` and parse stdout.
fn json_out(db: &Path, args: &[&str]) -> Value {
    let output = hearth_cmd(db)
        .args(args)
        .arg("--json")
        .output()
        .expect("command should not crash");
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("--json should produce valid JSON")
}

/// Create a person, returning their id.
fn add_person(db: &Path, name: &str, role: &str) -> i64 {
    let person = json_out(db, &["person", "add", "--name", name, "--role", role]);
    person["id"].as_i64().expect("person id")
}

/// Create a global chore, returning its id.
fn add_global_task(db: &Path, title: &str) -> i64 {
    let task = json_out(db, &["task", "add", "--title", title]);
    task["id"].as_i64().expect("task id")
}

/// Create a personal chore for `person_id`, returning its id.
fn add_personal_task(db: &Path, person_id: i64, title: &str) -> i64 {
    let task = json_out(
        db,
        &[
            "task",
            "add",
            "--title",
            title,
            "--person",
            &person_id.to_string(),
        ],
    );
    task["id"].as_i64().expect("task id")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn init_reports_database_and_schema() {
    let (_dir, db) = temp_db();
    let report = json_out(&db, &["init"]);
    assert_eq!(report["schema_version"].as_u64(), Some(2));
    assert!(db.exists(), "init must create the database file");
}

#[test]
fn fresh_person_snapshot_is_zeroed() {
    let (_dir, db) = temp_db();
    let person_id = add_person(&db, "Isaac", "kid");

    let snapshot = json_out(&db, &["person", "show", &person_id.to_string()]);
    assert_eq!(snapshot["total_tasks"].as_u64(), Some(0));
    assert_eq!(snapshot["progress"].as_u64(), Some(0));
    assert_eq!(snapshot["is_level2"].as_bool(), Some(false));
}

#[test]
fn checking_every_chore_reaches_level2() {
    let (_dir, db) = temp_db();
    let person_id = add_person(&db, "Isaac", "kid");
    let global_id = add_global_task(&db, "Brush teeth");
    let personal_id = add_personal_task(&db, person_id, "Feed the cat");

    json_out(
        &db,
        &[
            "check",
            &person_id.to_string(),
            &global_id.to_string(),
            "--day",
            "2024-02-14",
        ],
    );
    let snapshot = json_out(
        &db,
        &[
            "check",
            &person_id.to_string(),
            &personal_id.to_string(),
            "--kind",
            "personal",
            "--day",
            "2024-02-14",
        ],
    );

    assert_eq!(snapshot["completed_tasks"].as_u64(), Some(2));
    assert_eq!(snapshot["total_tasks"].as_u64(), Some(2));
    assert_eq!(snapshot["progress"].as_u64(), Some(100));
    assert_eq!(snapshot["is_level2"].as_bool(), Some(true));

    let days = json_out(
        &db,
        &[
            "calendar",
            &person_id.to_string(),
            "--year",
            "2024",
            "--month",
            "2",
        ],
    );
    let days = days.as_array().expect("calendar cells");
    assert_eq!(days.len(), 42);

    let cell = days
        .iter()
        .find(|cell| cell["date"] == "2024-02-14")
        .expect("checked day present");
    assert_eq!(cell["completed_tasks"].as_u64(), Some(2));
    assert_eq!(cell["total_tasks"].as_u64(), Some(2));
    assert_eq!(cell["is_level2"].as_bool(), Some(true));
}

#[test]
fn leap_february_grid_starts_on_preceding_sunday() {
    let (_dir, db) = temp_db();
    let person_id = add_person(&db, "Isaac", "kid");

    let days = json_out(
        &db,
        &[
            "calendar",
            &person_id.to_string(),
            "--year",
            "2024",
            "--month",
            "2",
        ],
    );
    let days = days.as_array().expect("calendar cells");

    assert_eq!(days.len(), 42);
    assert_eq!(days[0]["date"], "2024-01-28");
    assert_eq!(days[0]["is_current_month"].as_bool(), Some(false));
    assert_eq!(days[41]["date"], "2024-03-09");
}

#[test]
fn undo_clears_a_same_day_completion() {
    let (_dir, db) = temp_db();
    let person_id = add_person(&db, "Isaac", "kid");
    let global_id = add_global_task(&db, "Brush teeth");

    json_out(
        &db,
        &[
            "check",
            &person_id.to_string(),
            &global_id.to_string(),
            "--day",
            "2024-02-14",
        ],
    );
    let snapshot = json_out(
        &db,
        &[
            "check",
            &person_id.to_string(),
            &global_id.to_string(),
            "--undo",
            "--day",
            "2024-02-14",
        ],
    );
    assert_eq!(snapshot["completed_tasks"].as_u64(), Some(0));
    assert_eq!(snapshot["is_level2"].as_bool(), Some(false));
}

#[test]
fn removing_a_person_cascades() {
    let (_dir, db) = temp_db();
    let person_id = add_person(&db, "Isaac", "kid");
    let global_id = add_global_task(&db, "Brush teeth");
    json_out(
        &db,
        &[
            "check",
            &person_id.to_string(),
            &global_id.to_string(),
            "--day",
            "2024-02-14",
        ],
    );

    json_out(&db, &["person", "rm", &person_id.to_string()]);

    hearth_cmd(&db)
        .args(["person", "show", &person_id.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2001"));
}

#[test]
fn removing_a_completed_task_rewrites_the_calendar() {
    let (_dir, db) = temp_db();
    let person_id = add_person(&db, "Isaac", "kid");
    let brush = add_global_task(&db, "Brush teeth");
    let bed = add_global_task(&db, "Make bed");

    for task_id in [brush, bed] {
        json_out(
            &db,
            &[
                "check",
                &person_id.to_string(),
                &task_id.to_string(),
                "--day",
                "2024-02-14",
            ],
        );
    }

    json_out(&db, &["task", "rm", &brush.to_string()]);

    let days = json_out(
        &db,
        &[
            "calendar",
            &person_id.to_string(),
            "--year",
            "2024",
            "--month",
            "2",
        ],
    );
    let cell = days
        .as_array()
        .expect("cells")
        .iter()
        .find(|cell| cell["date"] == "2024-02-14")
        .expect("day present")
        .clone();
    assert_eq!(cell["total_tasks"].as_u64(), Some(1));
    assert_eq!(cell["completed_tasks"].as_u64(), Some(1));
    assert_eq!(cell["is_level2"].as_bool(), Some(true));
}

#[test]
fn all_people_calendar_lists_everyone() {
    let (_dir, db) = temp_db();
    add_person(&db, "Isaac", "kid");
    add_person(&db, "Mara", "parent");

    let months = json_out(&db, &["calendar", "--all", "--year", "2024", "--month", "2"]);
    let months = months.as_array().expect("person months");
    assert_eq!(months.len(), 2);
    assert_eq!(months[0]["name"], "Isaac");
    assert_eq!(months[1]["name"], "Mara");
    assert_eq!(months[0]["days"].as_array().expect("days").len(), 42);
}

#[test]
fn unknown_task_check_fails_cleanly() {
    let (_dir, db) = temp_db();
    let person_id = add_person(&db, "Isaac", "kid");

    hearth_cmd(&db)
        .args(["check", &person_id.to_string(), "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2002"));
}

#[test]
fn doctor_reports_ok_on_a_fresh_store() {
    let (_dir, db) = temp_db();
    let report = json_out(&db, &["doctor"]);
    assert_eq!(report["ok"].as_bool(), Some(true));
    assert_eq!(report["schema_version"].as_u64(), Some(2));
    assert_eq!(report["people"].as_u64(), Some(0));
}

#[test]
fn rebuild_day_emits_the_recomputed_summary() {
    let (_dir, db) = temp_db();
    let person_id = add_person(&db, "Isaac", "kid");
    let global_id = add_global_task(&db, "Brush teeth");
    json_out(
        &db,
        &[
            "check",
            &person_id.to_string(),
            &global_id.to_string(),
            "--day",
            "2024-02-14",
        ],
    );

    let summary = json_out(
        &db,
        &[
            "rebuild-day",
            &person_id.to_string(),
            "--day",
            "2024-02-14",
        ],
    );
    assert_eq!(summary["total_tasks"].as_u64(), Some(1));
    assert_eq!(summary["completed_tasks"].as_u64(), Some(1));
    assert_eq!(summary["is_level2"].as_bool(), Some(true));
}
