use std::path::PathBuf;

use indexmap::IndexMap;

use crate::model::config::PlanConfig;
use crate::model::link::BackgroundLink;
use crate::model::task::Task;

/// Overall completion summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

/// A loaded plan: the four persisted collections plus config and paths.
///
/// All mutation goes through `ops`; every mutation is followed by a
/// wholesale rewrite of the touched blob (see `io::plan_io`).
#[derive(Debug, Clone)]
pub struct Plan {
    /// Directory the plan was discovered from (parent of `dayplan/`)
    pub root: PathBuf,
    /// The `dayplan/` directory itself
    pub plan_dir: PathBuf,
    pub config: PlanConfig,
    /// Insertion-ordered task list; tasks are never deleted
    pub tasks: Vec<Task>,
    /// Completion flags by task id; absence means incomplete
    pub completed: IndexMap<String, bool>,
    /// Memo text by task id; entries are non-empty
    pub memos: IndexMap<String, String>,
    pub links: Vec<BackgroundLink>,
}

impl Plan {
    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.get(id).copied().unwrap_or(false)
    }

    pub fn memo(&self, id: &str) -> Option<&str> {
        self.memos.get(id).map(|s| s.as_str())
    }

    /// Completed / total / rounded percentage. An empty plan reports 0%.
    pub fn progress(&self) -> Progress {
        let completed = self.completed.values().filter(|done| **done).count();
        let total = self.tasks.len();
        let percentage = if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u32
        };
        Progress {
            completed,
            total,
            percentage,
        }
    }
}
