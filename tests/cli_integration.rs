//! Integration tests for the `dp` CLI.
//!
//! Each test creates a temp directory, runs `dp` as a subprocess, and
//! verifies stdout and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Get the path to the built `dp` binary.
fn dp_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("dp");
    path
}

/// Run `dp` with the given args in the given directory, returning
/// (stdout, stderr, success).
fn run_dp(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(dp_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run dp");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `dp` expecting success, return stdout.
fn run_dp_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_dp(dir, args);
    if !success {
        panic!(
            "dp {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Create a seeded plan in a fresh temp directory.
fn seeded_plan() -> TempDir {
    let tmp = TempDir::new().unwrap();
    run_dp_ok(tmp.path(), &["init"]);
    tmp
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn test_init_creates_plan_files() {
    let tmp = TempDir::new().unwrap();
    let stdout = run_dp_ok(tmp.path(), &["init"]);
    assert!(stdout.contains("21 tasks"));

    let plan_dir = tmp.path().join("dayplan");
    for file in [
        "plan.toml",
        "tasks.json",
        "completed.json",
        "memos.json",
        "links.json",
    ] {
        assert!(plan_dir.join(file).exists(), "missing {}", file);
    }

    let config = fs::read_to_string(plan_dir.join("plan.toml")).unwrap();
    assert!(config.contains("スケーラブル自給自足モデル"));
    assert!(config.contains("start_date = \"2025-07-01\""));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let tmp = seeded_plan();
    let (_, stderr, success) = run_dp(tmp.path(), &["init"]);
    assert!(!success);
    assert!(stderr.contains("already exists"));

    // --force reinitializes
    run_dp_ok(tmp.path(), &["init", "--force"]);
}

#[test]
fn test_init_empty() {
    let tmp = TempDir::new().unwrap();
    let stdout = run_dp_ok(tmp.path(), &["init", "--empty", "--name", "空の計画"]);
    assert!(stdout.contains("0 tasks"));

    let stdout = run_dp_ok(tmp.path(), &["progress"]);
    assert_eq!(stdout.trim(), "0/0 tasks done (0%)");
}

// ---------------------------------------------------------------------------
// List / overdue
// ---------------------------------------------------------------------------

#[test]
fn test_list_day_in_insertion_order() {
    let tmp = seeded_plan();
    let stdout = run_dp_ok(tmp.path(), &["list", "2025-07-01"]);
    assert!(stdout.contains("== 2025-07-01 (火) =="));

    let a = stdout.find("A-01").unwrap();
    let b = stdout.find("B-01").unwrap();
    let d = stdout.find("D-01").unwrap();
    assert!(a < b && b < d);
    // Only that day's tasks
    assert!(!stdout.contains("A-02"));
}

#[test]
fn test_list_empty_day() {
    let tmp = seeded_plan();
    let stdout = run_dp_ok(tmp.path(), &["list", "2025-07-05"]);
    assert!(stdout.contains("(no tasks)"));
}

#[test]
fn test_list_json() {
    let tmp = seeded_plan();
    let stdout = run_dp_ok(tmp.path(), &["list", "2025-07-01", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["date"], "2025-07-01");
    assert_eq!(parsed["tasks"].as_array().unwrap().len(), 3);
    assert_eq!(parsed["tasks"][0]["id"], "A-01");
    assert_eq!(parsed["tasks"][0]["completed"], false);
}

#[test]
fn test_list_all_groups_by_date() {
    let tmp = seeded_plan();
    let stdout = run_dp_ok(tmp.path(), &["list", "--all"]);
    let first = stdout.find("== 2025-07-01").unwrap();
    let last = stdout.find("== 2025-07-09").unwrap();
    assert!(first < last);
}

#[test]
fn test_overdue_matches_seeded_example() {
    let tmp = seeded_plan();

    // Nothing is overdue on the start date
    let stdout = run_dp_ok(tmp.path(), &["overdue", "--date", "2025-07-01"]);
    assert!(stdout.contains("no overdue tasks"));

    // On 07-02, exactly the three 07-01 tasks
    let stdout = run_dp_ok(tmp.path(), &["overdue", "--date", "2025-07-02"]);
    for id in ["A-01", "B-01", "D-01"] {
        assert!(stdout.contains(id), "missing {}", id);
    }
    assert_eq!(stdout.lines().count(), 3);

    // Completing one removes it
    run_dp_ok(tmp.path(), &["toggle", "B-01"]);
    let stdout = run_dp_ok(tmp.path(), &["overdue", "--date", "2025-07-02"]);
    assert!(!stdout.contains("B-01"));
    assert_eq!(stdout.lines().count(), 2);
}

// ---------------------------------------------------------------------------
// Toggle / progress
// ---------------------------------------------------------------------------

#[test]
fn test_toggle_and_progress() {
    let tmp = seeded_plan();
    assert_eq!(run_dp_ok(tmp.path(), &["progress"]).trim(), "0/21 tasks done (0%)");

    let stdout = run_dp_ok(tmp.path(), &["toggle", "A-01"]);
    assert!(stdout.contains("A-01 marked done"));
    assert_eq!(run_dp_ok(tmp.path(), &["progress"]).trim(), "1/21 tasks done (5%)");

    // Double toggle restores the prior state
    let stdout = run_dp_ok(tmp.path(), &["toggle", "A-01"]);
    assert!(stdout.contains("A-01 reopened"));
    assert_eq!(run_dp_ok(tmp.path(), &["progress"]).trim(), "0/21 tasks done (0%)");

    // The completion blob keeps the (false) entry
    let completed = fs::read_to_string(tmp.path().join("dayplan/completed.json")).unwrap();
    assert!(completed.contains("\"A-01\": false"));
}

#[test]
fn test_toggle_unknown_id_fails() {
    let tmp = seeded_plan();
    let (_, stderr, success) = run_dp(tmp.path(), &["toggle", "Z-99"]);
    assert!(!success);
    assert!(stderr.contains("task not found"));
}

// ---------------------------------------------------------------------------
// Add
// ---------------------------------------------------------------------------

#[test]
fn test_add_task() {
    let tmp = seeded_plan();
    let stdout = run_dp_ok(
        tmp.path(),
        &[
            "add",
            "餌の在庫を確認する",
            "--category",
            "A",
            "--date",
            "2025-07-05",
        ],
    );
    // Category A has 7 seeded tasks
    assert!(stdout.contains("added A-08 on 2025-07-05"));

    let stdout = run_dp_ok(tmp.path(), &["list", "2025-07-05"]);
    assert!(stdout.contains("A-08"));
    assert!(stdout.contains("餌の在庫を確認する"));
    assert!(stdout.contains("追加タスク"));

    assert_eq!(run_dp_ok(tmp.path(), &["progress"]).trim(), "0/22 tasks done (0%)");
}

#[test]
fn test_add_empty_content_is_noop() {
    let tmp = seeded_plan();
    let stdout = run_dp_ok(tmp.path(), &["add", "   ", "--date", "2025-07-05"]);
    assert!(stdout.contains("nothing to add"));
    assert_eq!(run_dp_ok(tmp.path(), &["progress"]).trim(), "0/21 tasks done (0%)");
}

#[test]
fn test_add_rejects_unknown_category() {
    let tmp = seeded_plan();
    let (_, stderr, success) = run_dp(tmp.path(), &["add", "x", "--category", "E"]);
    assert!(!success);
    assert!(stderr.contains("unknown category"));
}

// ---------------------------------------------------------------------------
// Memo / show
// ---------------------------------------------------------------------------

#[test]
fn test_memo_set_show_clear() {
    let tmp = seeded_plan();

    let stdout = run_dp_ok(tmp.path(), &["memo", "A-01"]);
    assert!(stdout.contains("(no memo)"));

    run_dp_ok(tmp.path(), &["memo", "A-01", "品種はエムデンに決定"]);
    let stdout = run_dp_ok(tmp.path(), &["memo", "A-01"]);
    assert_eq!(stdout.trim(), "品種はエムデンに決定");

    // Clearing with an empty argument removes the entry
    run_dp_ok(tmp.path(), &["memo", "A-01", ""]);
    let stdout = run_dp_ok(tmp.path(), &["memo", "A-01"]);
    assert!(stdout.contains("(no memo)"));
    let memos = fs::read_to_string(tmp.path().join("dayplan/memos.json")).unwrap();
    assert_eq!(memos.trim(), "{}");
}

#[test]
fn test_show_task_detail() {
    let tmp = seeded_plan();
    run_dp_ok(tmp.path(), &["memo", "C-01", "竹は裏山から調達"]);

    let stdout = run_dp_ok(tmp.path(), &["show", "C-01"]);
    assert!(stdout.contains("C-01"));
    assert!(stdout.contains("「移動式竹柵」の設計図を作成する"));
    assert!(stdout.contains("category: C (設備関連)"));
    assert!(stdout.contains("竹は裏山から調達"));
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

#[test]
fn test_link_crud() {
    let tmp = seeded_plan();

    let stdout = run_dp_ok(tmp.path(), &["link", "list"]);
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.contains("スケーラブル自給自足モデル"));

    let stdout = run_dp_ok(tmp.path(), &["link", "add"]);
    let id = stdout.trim().strip_prefix("added link ").unwrap().to_string();
    assert!(id.starts_with("link-"));

    // A fresh link is incomplete until both fields are set
    let stdout = run_dp_ok(tmp.path(), &["link", "list"]);
    assert!(stdout.contains("(incomplete)"));

    run_dp_ok(tmp.path(), &["link", "set", &id, "name", "飼育メモ"]);
    run_dp_ok(tmp.path(), &["link", "set", &id, "url", "https://example.com/geese"]);
    let stdout = run_dp_ok(tmp.path(), &["link", "list"]);
    assert!(!stdout.contains("(incomplete)"));
    assert!(stdout.contains("https://example.com/geese"));

    run_dp_ok(tmp.path(), &["link", "rm", &id]);
    let stdout = run_dp_ok(tmp.path(), &["link", "list"]);
    assert_eq!(stdout.lines().count(), 3);
}

#[test]
fn test_link_set_rejects_unknown_field() {
    let tmp = seeded_plan();
    let (_, stderr, success) = run_dp(tmp.path(), &["link", "set", "link-1", "title", "x"]);
    assert!(!success);
    assert!(stderr.contains("unknown field"));
}

#[test]
fn test_link_json() {
    let tmp = seeded_plan();
    let stdout = run_dp_ok(tmp.path(), &["link", "list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let links = parsed.as_array().unwrap();
    assert_eq!(links.len(), 3);
    assert_eq!(links[0]["navigable"], true);
}

// ---------------------------------------------------------------------------
// Export / search
// ---------------------------------------------------------------------------

#[test]
fn test_export_report_format() {
    let tmp = seeded_plan();
    run_dp_ok(tmp.path(), &["toggle", "A-01"]);
    run_dp_ok(tmp.path(), &["memo", "A-01", "調査完了"]);

    let stdout = run_dp_ok(tmp.path(), &["export"]);
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next().unwrap(),
        "# スケーラブル自給自足モデル 進捗レポート"
    );
    assert!(stdout.contains("## 全体進捗: 1/21 (5%)"));
    assert!(stdout.contains("### 2025-07-01"));
    assert!(stdout.contains("- [x] **A-01**: ガチョウの品種、飼育方法、地域の関連法規に関する調査"));
    assert!(stdout.contains("  - メモ: 調査完了"));
    assert!(stdout.contains("- [ ] **B-01**:"));

    // Date sections ascend
    let d1 = stdout.find("### 2025-07-01").unwrap();
    let d9 = stdout.find("### 2025-07-09").unwrap();
    assert!(d1 < d9);
}

#[test]
fn test_search() {
    let tmp = seeded_plan();
    let stdout = run_dp_ok(tmp.path(), &["search", "竹柵"]);
    assert_eq!(stdout.lines().count(), 5);
    assert!(stdout.contains("C-01"));

    let stdout = run_dp_ok(tmp.path(), &["search", "存在しない語"]);
    assert!(stdout.contains("no matches"));
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn test_pinned_today_drives_defaults() {
    let tmp = seeded_plan();
    let config_path = tmp.path().join("dayplan/plan.toml");
    let config = fs::read_to_string(&config_path).unwrap();
    let config = config.replace(
        "# today = \"2025-07-01\"",
        "today = \"2025-07-02\"",
    );
    fs::write(&config_path, config).unwrap();

    // `overdue` without --date now uses the pinned today
    let stdout = run_dp_ok(tmp.path(), &["overdue"]);
    assert_eq!(stdout.lines().count(), 3);

    // `list` without a date shows the pinned day's tasks
    let stdout = run_dp_ok(tmp.path(), &["list"]);
    assert!(stdout.contains("A-02"));
}
