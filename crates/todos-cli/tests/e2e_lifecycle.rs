//! E2E CLI lifecycle tests: add, list, toggle, edit, rm, stats.
//!
//! Each test runs `td` as a subprocess against an isolated temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the `td` binary with its data under `dir`.
fn td_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("td"));
    cmd.current_dir(dir);
    cmd.env("TODOS_DIR", dir.join("data"));
    // Keep the user's config and format preferences out of the run
    cmd.env("XDG_CONFIG_HOME", dir.join("config"));
    cmd.env("HOME", dir);
    cmd.env_remove("FORMAT");
    // Suppress tracing output that goes to stderr
    cmd.env("TODOS_LOG", "error");
    cmd
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = td_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("td should not crash");
    assert!(
        output.status.success(),
        "td {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("--json should produce valid JSON")
}

/// Add a task via CLI, return its ID.
fn add_task(dir: &Path, text: &str) -> String {
    let json = run_json(dir, &["add", text]);
    json["id"]
        .as_str()
        .expect("add output should have 'id' field")
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn add_returns_normalized_task() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["add", "  Buy", "  milk  "]);

    assert_eq!(json["text"], "Buy milk");
    assert_eq!(json["completed"], false);
    assert_eq!(json["createdAt"], json["updatedAt"]);
    assert!(json["id"].as_str().unwrap().starts_with("td-"));
}

#[test]
fn buy_milk_walk_dog_stats() {
    let dir = TempDir::new().expect("tempdir");
    let milk = add_task(dir.path(), "Buy milk");
    add_task(dir.path(), "Walk dog");

    let toggled = run_json(dir.path(), &["toggle", &milk]);
    assert_eq!(toggled["completed"], true);

    let stats = run_json(dir.path(), &["stats"]);
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["completed"], 1);
    assert_eq!(stats["pending"], 1);
}

#[test]
fn list_follows_saved_filter() {
    let dir = TempDir::new().expect("tempdir");
    let milk = add_task(dir.path(), "Buy milk");
    let dog = add_task(dir.path(), "Walk dog");
    run_json(dir.path(), &["toggle", &milk]);
    run_json(dir.path(), &["filter", "pending"]);

    let listed = run_json(dir.path(), &["list"]);
    assert_eq!(listed["filter"], "pending");
    let tasks = listed["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], dog.as_str());

    let all = run_json(dir.path(), &["list", "--all"]);
    assert_eq!(all["tasks"].as_array().unwrap().len(), 2);
}

#[test]
fn text_list_prints_rows() {
    let dir = TempDir::new().expect("tempdir");
    let id = add_task(dir.path(), "Walk dog");

    td_cmd(dir.path())
        .args(["list", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID  STATUS  TEXT"))
        .stdout(predicate::str::contains(format!("{id}  pending  Walk dog")));
}

#[test]
fn edit_changes_text_and_flag() {
    let dir = TempDir::new().expect("tempdir");
    let id = add_task(dir.path(), "Buy milk");

    let edited = run_json(
        dir.path(),
        &["edit", &id, "--text", "Buy oat milk", "--completed", "yes"],
    );
    assert_eq!(edited["text"], "Buy oat milk");
    assert_eq!(edited["completed"], true);

    let shown = run_json(dir.path(), &["show", &id]);
    assert_eq!(shown["text"], "Buy oat milk");
}

#[test]
fn partial_ids_resolve() {
    let dir = TempDir::new().expect("tempdir");
    let id = add_task(dir.path(), "Buy milk");
    let suffix = id.trim_start_matches("td-");

    let shown = run_json(dir.path(), &["show", suffix]);
    assert_eq!(shown["id"], id.as_str());
}

#[test]
fn rm_and_clear_completed() {
    let dir = TempDir::new().expect("tempdir");
    let milk = add_task(dir.path(), "Buy milk");
    let dog = add_task(dir.path(), "Walk dog");
    let cat = add_task(dir.path(), "Feed cat");

    let removed = run_json(dir.path(), &["rm", &milk]);
    assert_eq!(removed["removed"], milk.as_str());

    run_json(dir.path(), &["toggle", &dog]);
    let cleared = run_json(dir.path(), &["clear-completed"]);
    assert_eq!(cleared["removed"], 1);
    assert_eq!(cleared["remaining"], 1);

    let count = run_json(dir.path(), &["count"]);
    assert_eq!(count["count"], 1);
    assert_eq!(count["empty"], false);

    let all = run_json(dir.path(), &["list", "--all"]);
    assert_eq!(all["tasks"][0]["id"], cat.as_str());
}

#[test]
fn clear_empties_list() {
    let dir = TempDir::new().expect("tempdir");
    add_task(dir.path(), "Buy milk");

    let cleared = run_json(dir.path(), &["clear"]);
    assert_eq!(cleared["ok"], true);

    let count = run_json(dir.path(), &["count"]);
    assert_eq!(count["count"], 0);
    assert_eq!(count["empty"], true);
}

#[test]
fn dir_flag_overrides_env() {
    let dir = TempDir::new().expect("tempdir");
    let other = dir.path().join("elsewhere");

    td_cmd(dir.path())
        .args(["add", "Somewhere else", "--dir"])
        .arg(&other)
        .assert()
        .success();

    assert!(other.join("todos.json").exists());
    assert!(!dir.path().join("data").join("todos.json").exists());
}
