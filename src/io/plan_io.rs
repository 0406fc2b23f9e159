use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::config::PlanConfig;
use crate::model::link::BackgroundLink;
use crate::model::plan::Plan;
use crate::model::task::Task;
use crate::seed;

pub const PLAN_DIR: &str = "dayplan";
pub const CONFIG_FILE: &str = "plan.toml";

/// The four persisted collections, one blob each. Every blob is read once
/// at load and rewritten wholesale after a mutation that touches it.
pub const TASKS_FILE: &str = "tasks.json";
pub const COMPLETED_FILE: &str = "completed.json";
pub const MEMOS_FILE: &str = "memos.json";
pub const LINKS_FILE: &str = "links.json";

/// Error type for plan I/O operations
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("not a dayplan directory: no dayplan/plan.toml found")]
    NotAPlan,
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not parse plan.toml: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Discover the plan by walking up from the given directory, looking for
/// a `dayplan/` subdirectory with a `plan.toml` inside.
pub fn discover_plan(start: &Path) -> Result<PathBuf, PlanError> {
    let mut current = start.to_path_buf();
    loop {
        let plan_dir = current.join(PLAN_DIR);
        if plan_dir.is_dir() && plan_dir.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(PlanError::NotAPlan);
        }
    }
}

/// Load a complete plan from the given root directory.
///
/// A missing blob falls back to its seed/default: `tasks.json` to the
/// fixed initial list, `completed.json`/`memos.json` to empty maps and
/// `links.json` to the default links. Malformed JSON is an error, not a
/// fallback.
pub fn load_plan(root: &Path) -> Result<Plan, PlanError> {
    let plan_dir = root.join(PLAN_DIR);
    if !plan_dir.is_dir() {
        return Err(PlanError::NotAPlan);
    }

    let config_path = plan_dir.join(CONFIG_FILE);
    let config_text = fs::read_to_string(&config_path).map_err(|e| PlanError::Read {
        path: config_path.clone(),
        source: e,
    })?;
    let config: PlanConfig = toml::from_str(&config_text)?;

    let tasks: Vec<Task> = read_json_or(&plan_dir.join(TASKS_FILE), seed::initial_tasks)?;
    let completed: IndexMap<String, bool> =
        read_json_or(&plan_dir.join(COMPLETED_FILE), IndexMap::new)?;
    let memos: IndexMap<String, String> = read_json_or(&plan_dir.join(MEMOS_FILE), IndexMap::new)?;
    let links: Vec<BackgroundLink> = read_json_or(&plan_dir.join(LINKS_FILE), seed::default_links)?;

    Ok(Plan {
        root: root.to_path_buf(),
        plan_dir,
        config,
        tasks,
        completed,
        memos,
        links,
    })
}

/// Read a JSON blob, falling back to `default` when the file is absent.
fn read_json_or<T: DeserializeOwned>(
    path: &Path,
    default: impl FnOnce() -> T,
) -> Result<T, PlanError> {
    if !path.exists() {
        return Ok(default());
    }
    let text = fs::read_to_string(path).map_err(|e| PlanError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| PlanError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write one blob wholesale (pretty JSON, atomic rename). On failure the
/// serialized payload is appended to the recovery log before the error is
/// returned, so the state that failed to land is not lost.
fn write_json<T: Serialize>(plan_dir: &Path, file: &str, value: &T) -> Result<(), PlanError> {
    let path = plan_dir.join(file);
    let content = serde_json::to_string_pretty(value).map_err(|e| PlanError::Json {
        path: path.clone(),
        source: e,
    })?;
    if let Err(e) = crate::io::recovery::atomic_write(&path, content.as_bytes()) {
        crate::io::recovery::log_write_failure(plan_dir, file, &e, &content);
        return Err(PlanError::Write { path, source: e });
    }
    Ok(())
}

pub fn save_tasks(plan: &Plan) -> Result<(), PlanError> {
    write_json(&plan.plan_dir, TASKS_FILE, &plan.tasks)
}

pub fn save_completed(plan: &Plan) -> Result<(), PlanError> {
    write_json(&plan.plan_dir, COMPLETED_FILE, &plan.completed)
}

pub fn save_memos(plan: &Plan) -> Result<(), PlanError> {
    write_json(&plan.plan_dir, MEMOS_FILE, &plan.memos)
}

pub fn save_links(plan: &Plan) -> Result<(), PlanError> {
    write_json(&plan.plan_dir, LINKS_FILE, &plan.links)
}

/// Write all four blobs. Used by init; mutations save only what changed.
pub fn save_all(plan: &Plan) -> Result<(), PlanError> {
    save_tasks(plan)?;
    save_completed(plan)?;
    save_memos(plan)?;
    save_links(plan)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_plan(root: &Path) {
        let plan_dir = root.join(PLAN_DIR);
        fs::create_dir_all(&plan_dir).unwrap();
        fs::write(
            plan_dir.join(CONFIG_FILE),
            "[plan]\nname = \"テスト計画\"\n",
        )
        .unwrap();
        fs::write(
            plan_dir.join(TASKS_FILE),
            r#"[{"id":"A-01","date":"2025-07-01","content":"調査","category":"A","phase":"計画・準備"}]"#,
        )
        .unwrap();
        fs::write(plan_dir.join(COMPLETED_FILE), r#"{"A-01":true}"#).unwrap();
        fs::write(plan_dir.join(MEMOS_FILE), r#"{"A-01":"現地確認済み"}"#).unwrap();
        fs::write(plan_dir.join(LINKS_FILE), "[]").unwrap();
    }

    #[test]
    fn test_discover_plan_walks_up() {
        let tmp = TempDir::new().unwrap();
        create_test_plan(tmp.path());
        let sub = tmp.path().join("a/b");
        fs::create_dir_all(&sub).unwrap();

        assert_eq!(discover_plan(tmp.path()).unwrap(), tmp.path());
        assert_eq!(discover_plan(&sub).unwrap(), tmp.path());
    }

    #[test]
    fn test_discover_plan_not_found() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            discover_plan(tmp.path()),
            Err(PlanError::NotAPlan)
        ));
    }

    #[test]
    fn test_load_plan_reads_all_blobs() {
        let tmp = TempDir::new().unwrap();
        create_test_plan(tmp.path());

        let plan = load_plan(tmp.path()).unwrap();
        assert_eq!(plan.config.plan.name, "テスト計画");
        assert_eq!(plan.tasks.len(), 1);
        assert!(plan.is_completed("A-01"));
        assert_eq!(plan.memo("A-01"), Some("現地確認済み"));
        assert!(plan.links.is_empty());
    }

    #[test]
    fn test_missing_blobs_fall_back_to_seed() {
        let tmp = TempDir::new().unwrap();
        let plan_dir = tmp.path().join(PLAN_DIR);
        fs::create_dir_all(&plan_dir).unwrap();
        fs::write(plan_dir.join(CONFIG_FILE), "[plan]\nname = \"x\"\n").unwrap();

        let plan = load_plan(tmp.path()).unwrap();
        assert_eq!(plan.tasks.len(), 21);
        assert!(plan.completed.is_empty());
        assert!(plan.memos.is_empty());
        assert_eq!(plan.links.len(), 3);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let tmp = TempDir::new().unwrap();
        create_test_plan(tmp.path());
        fs::write(tmp.path().join(PLAN_DIR).join(TASKS_FILE), "not json {{{").unwrap();

        assert!(matches!(
            load_plan(tmp.path()),
            Err(PlanError::Json { .. })
        ));
    }

    #[test]
    fn test_save_rewrites_blob_wholesale() {
        let tmp = TempDir::new().unwrap();
        create_test_plan(tmp.path());

        let mut plan = load_plan(tmp.path()).unwrap();
        plan.completed.insert("B-01".to_string(), true);
        save_completed(&plan).unwrap();

        let reloaded = load_plan(tmp.path()).unwrap();
        assert!(reloaded.is_completed("A-01"));
        assert!(reloaded.is_completed("B-01"));
    }
}
