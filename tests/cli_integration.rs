//! Integration tests for the `tl` CLI.
//!
//! Each test creates a temp project directory, runs `tl` as a subprocess,
//! and verifies stdout and/or store file contents.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Get the path to the built `tl` binary.
fn tl_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tl");
    path
}

fn run_tl(dir: &Path, args: &[&str]) -> Output {
    Command::new(tl_bin())
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run tl")
}

fn run_ok(dir: &Path, args: &[&str]) -> String {
    let out = run_tl(dir, args);
    assert!(
        out.status.success(),
        "tl {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8(out.stdout).unwrap()
}

fn today() -> String {
    chrono::Local::now().date_naive().to_string()
}

fn init_project(dir: &Path) {
    run_ok(dir, &["init"]);
}

fn list_json(dir: &Path) -> serde_json::Value {
    serde_json::from_str(&run_ok(dir, &["list", "--json"])).unwrap()
}

fn first_task_id(dir: &Path) -> String {
    list_json(dir)["tasks"][0]["id"].as_str().unwrap().to_string()
}

#[test]
fn test_init_creates_config_and_store() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());
    assert!(tmp.path().join("taskline.toml").exists());
    assert!(tmp.path().join("tasks.json").exists());

    let out = run_ok(tmp.path(), &["list"]);
    assert!(out.contains("no tasks"));

    // Re-init without --force is refused
    let out = run_tl(tmp.path(), &["init"]);
    assert!(!out.status.success());
}

#[test]
fn test_add_and_list() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());
    run_ok(
        tmp.path(),
        &[
            "add",
            "write report",
            "--start",
            "2024-01-01",
            "--deadline",
            "2024-02-01",
            "--priority",
            "high",
            "--notes",
            "for the board",
        ],
    );

    let json = list_json(tmp.path());
    let task = &json["tasks"][0];
    assert_eq!(task["name"], "write report");
    assert_eq!(task["start"], "2024-01-01");
    assert_eq!(task["plan_end"], "2024-02-01");
    assert_eq!(task["priority"], "high");
    assert_eq!(task["notes"], "for the board");
    assert_eq!(task["done"], false);
    assert!(task.get("done_date").is_none());
}

#[test]
fn test_add_defaults_start_to_today() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());
    run_ok(tmp.path(), &["add", "quick one", "--deadline", "2099-01-01"]);
    let json = list_json(tmp.path());
    assert_eq!(json["tasks"][0]["start"], today());
    assert_eq!(json["tasks"][0]["priority"], "medium");
}

#[test]
fn test_add_rejects_deadline_before_start() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());
    let out = run_tl(
        tmp.path(),
        &[
            "add",
            "backwards",
            "--start",
            "2024-03-10",
            "--deadline",
            "2024-03-01",
        ],
    );
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("earlier than start"), "stderr: {stderr}");

    // Nothing was written
    assert_eq!(list_json(tmp.path())["tasks"].as_array().unwrap().len(), 0);
}

#[test]
fn test_done_stamps_today_and_undone_clears() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());
    run_ok(
        tmp.path(),
        &["add", "t", "--start", "2024-01-01", "--deadline", "2024-02-01"],
    );
    let id = first_task_id(tmp.path());

    run_ok(tmp.path(), &["done", &id]);
    let task = &list_json(tmp.path())["tasks"][0];
    assert_eq!(task["done"], true);
    assert_eq!(task["done_date"], today());

    // Marking done again is a no-op for the stamp
    run_ok(tmp.path(), &["done", &id]);
    assert_eq!(list_json(tmp.path())["tasks"][0]["done_date"], today());

    run_ok(tmp.path(), &["undone", &id]);
    let task = &list_json(tmp.path())["tasks"][0];
    assert_eq!(task["done"], false);
    assert!(task.get("done_date").is_none());
}

#[test]
fn test_done_unknown_id_fails() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());
    let out = run_tl(tmp.path(), &["done", "nope"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("task not found"));
}

#[test]
fn test_edit_applies_table_and_stamps_transition() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());
    run_ok(
        tmp.path(),
        &["add", "t", "--start", "2024-01-01", "--deadline", "2024-02-01"],
    );
    let id = first_task_id(tmp.path());

    // Rename, bump priority, and tick the done box
    let table = format!(
        "id\tname\tstart\tplan_end\tpriority\tnotes\tdone\tdone_date\n\
         {id}\trenamed\t2024-01-01\t2024-02-01\tcritical\t\tTRUE\t\n"
    );
    let table_path = tmp.path().join("edit.tsv");
    std::fs::write(&table_path, table).unwrap();
    run_ok(tmp.path(), &["edit", table_path.to_str().unwrap()]);

    let task = &list_json(tmp.path())["tasks"][0];
    assert_eq!(task["name"], "renamed");
    assert_eq!(task["priority"], "critical");
    assert_eq!(task["done"], true);
    assert_eq!(task["done_date"], today());
}

#[test]
fn test_edit_rejects_batch_with_bad_dates() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());
    run_ok(
        tmp.path(),
        &["add", "t", "--start", "2024-01-01", "--deadline", "2024-02-01"],
    );
    let id = first_task_id(tmp.path());

    let table = format!(
        "id\tname\tstart\tplan_end\tpriority\tnotes\tdone\tdone_date\n\
         {id}\tt\t2024-03-10\t2024-03-01\tmedium\t\tFALSE\t\n"
    );
    let table_path = tmp.path().join("edit.tsv");
    std::fs::write(&table_path, table).unwrap();
    let out = run_tl(tmp.path(), &["edit", table_path.to_str().unwrap()]);
    assert!(!out.status.success());

    // The store is untouched
    let task = &list_json(tmp.path())["tasks"][0];
    assert_eq!(task["start"], "2024-01-01");
    assert_eq!(task["plan_end"], "2024-02-01");
}

#[test]
fn test_chart_orders_by_section_and_priority() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());
    for (name, priority) in [("h", "high"), ("l", "low"), ("c", "critical")] {
        run_ok(
            tmp.path(),
            &[
                "add", name, "--start", "2024-01-01", "--deadline", "2024-02-01",
                "--priority", priority,
            ],
        );
    }

    let json: serde_json::Value =
        serde_json::from_str(&run_ok(tmp.path(), &["chart", "--json"])).unwrap();
    let labels: Vec<&str> = json["bars"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["c", "h", "l"]);
    assert_eq!(json["bars"][0]["color"], "#e63946");
    assert_eq!(json["bars"][0]["section"], "Active");
}

#[test]
fn test_chart_hide_done_and_name_filter() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());
    run_ok(
        tmp.path(),
        &["add", "keep me", "--start", "2024-01-01", "--deadline", "2024-02-01"],
    );
    run_ok(
        tmp.path(),
        &["add", "finished", "--start", "2024-01-01", "--deadline", "2024-02-01"],
    );
    let json = list_json(tmp.path());
    let done_id = json["tasks"][1]["id"].as_str().unwrap().to_string();
    run_ok(tmp.path(), &["done", &done_id]);

    let chart: serde_json::Value =
        serde_json::from_str(&run_ok(tmp.path(), &["chart", "--json", "--hide-done"])).unwrap();
    let labels: Vec<&str> = chart["bars"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["keep me"]);

    let chart: serde_json::Value = serde_json::from_str(&run_ok(
        tmp.path(),
        &["chart", "--json", "--filter", "KEEP"],
    ))
    .unwrap();
    assert_eq!(chart["bars"].as_array().unwrap().len(), 1);
}

#[test]
fn test_chart_done_bar_ends_on_completion_date() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());
    run_ok(
        tmp.path(),
        &["add", "t", "--start", "2024-01-01", "--deadline", "2024-02-10"],
    );
    let id = first_task_id(tmp.path());

    // Set done with an explicit completion date via the table editor:
    // first tick the box (stamps today), then edit the stamp in place.
    run_ok(tmp.path(), &["done", &id]);
    let table = format!(
        "id\tname\tstart\tplan_end\tpriority\tnotes\tdone\tdone_date\n\
         {id}\tt\t2024-01-01\t2024-02-10\tmedium\t\tTRUE\t2024-02-01\n"
    );
    let table_path = tmp.path().join("edit.tsv");
    std::fs::write(&table_path, table).unwrap();
    run_ok(tmp.path(), &["edit", table_path.to_str().unwrap()]);

    let chart: serde_json::Value =
        serde_json::from_str(&run_ok(tmp.path(), &["chart", "--json"])).unwrap();
    assert_eq!(chart["bars"][0]["end"], "2024-02-01");
    assert_eq!(chart["bars"][0]["plan_end"], "2024-02-10");
}

#[test]
fn test_sheet_backend_round_trip() {
    let tmp = TempDir::new().unwrap();
    run_ok(tmp.path(), &["init", "--backend", "sheet"]);
    let sheet_path = tmp.path().join("tasks.sheet");
    assert!(sheet_path.exists());

    run_ok(
        tmp.path(),
        &["add", "on the sheet", "--start", "2024-01-01", "--deadline", "2024-02-01"],
    );
    let text = std::fs::read_to_string(&sheet_path).unwrap();
    assert!(text.starts_with("id\tname\tstart\tplan_end\tpriority\tnotes\tdone\tdone_date\n"));
    assert!(text.contains("on the sheet"));

    let json = list_json(tmp.path());
    assert_eq!(json["tasks"][0]["name"], "on the sheet");
}

#[test]
fn test_clear_requires_force() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());
    run_ok(
        tmp.path(),
        &["add", "t", "--start", "2024-01-01", "--deadline", "2024-02-01"],
    );

    let out = run_tl(tmp.path(), &["clear"]);
    assert!(!out.status.success());
    assert_eq!(list_json(tmp.path())["tasks"].as_array().unwrap().len(), 1);

    run_ok(tmp.path(), &["clear", "--force"]);
    assert_eq!(list_json(tmp.path())["tasks"].as_array().unwrap().len(), 0);
}

#[test]
fn test_project_dir_flag() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());
    // Run from elsewhere with -C pointing at the project
    let elsewhere = TempDir::new().unwrap();
    let out = run_tl(
        elsewhere.path(),
        &["-C", tmp.path().to_str().unwrap(), "list"],
    );
    assert!(out.status.success());

    // Without -C there is no project to discover
    let out = run_tl(elsewhere.path(), &["list"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not a taskline project"));
}
