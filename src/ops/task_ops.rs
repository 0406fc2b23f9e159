use chrono::{Local, NaiveDate};

use crate::model::plan::Plan;
use crate::model::task::{Category, Task};

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(String),
}

/// The reference "today": pinned in plan.toml if set, else the system date.
pub fn today(plan: &Plan) -> NaiveDate {
    plan.config
        .plan
        .today
        .unwrap_or_else(|| Local::now().date_naive())
}

/// Tasks scheduled for `date`, in insertion order.
pub fn tasks_for_date(plan: &Plan, date: NaiveDate) -> Vec<&Task> {
    plan.tasks.iter().filter(|t| t.date == date).collect()
}

/// Tasks dated before `today` and not completed, in insertion order.
pub fn overdue_tasks(plan: &Plan, today: NaiveDate) -> Vec<&Task> {
    plan.tasks
        .iter()
        .filter(|t| t.date < today && !plan.is_completed(&t.id))
        .collect()
}

/// Flip the completion flag for `id`; an absent entry counts as false, so
/// the first toggle yields true. Returns the new value.
///
/// The completion map is keyed independently of the task list; callers
/// that only want to toggle real tasks check `plan.find_task` first.
pub fn toggle_complete(plan: &mut Plan, id: &str) -> bool {
    let entry = plan.completed.entry(id.to_string()).or_insert(false);
    *entry = !*entry;
    *entry
}

/// Add a task for `date`. Whitespace-only content is a no-op returning
/// None; otherwise the new task's id is returned.
pub fn add_task(
    plan: &mut Plan,
    content: &str,
    category: Category,
    phase: &str,
    date: NaiveDate,
) -> Option<String> {
    let content = content.trim();
    if content.is_empty() {
        return None;
    }
    let id = next_task_id(plan, category);
    plan.tasks
        .push(Task::new(id.clone(), date, content, category, phase));
    Some(id)
}

/// Next free `<letter>-<NN>` id for a category. The sequence starts at
/// count-of-category + 1 and bumps past any id already taken.
pub fn next_task_id(plan: &Plan, category: Category) -> String {
    let count = plan
        .tasks
        .iter()
        .filter(|t| t.category == category)
        .count();
    let mut seq = count + 1;
    loop {
        let id = format!("{}-{:02}", category.letter(), seq);
        if plan.find_task(&id).is_none() {
            return id;
        }
        seq += 1;
    }
}

/// Upsert the memo for `id`. Empty text removes the entry (absence and
/// empty are indistinguishable everywhere a memo is shown).
pub fn set_memo(plan: &mut Plan, id: &str, text: &str) {
    if text.is_empty() {
        plan.memos.shift_remove(id);
    } else {
        plan.memos.insert(id.to_string(), text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::{CategoryLabels, PlanConfig, PlanInfo, UiConfig};
    use crate::seed;
    use indexmap::IndexMap;
    use std::path::PathBuf;

    fn seeded_plan() -> Plan {
        Plan {
            root: PathBuf::from("/tmp/test"),
            plan_dir: PathBuf::from("/tmp/test/dayplan"),
            config: PlanConfig {
                plan: PlanInfo {
                    name: seed::DEFAULT_PLAN_NAME.to_string(),
                    start_date: None,
                    end_date: None,
                    today: NaiveDate::from_ymd_opt(2025, 7, 1),
                },
                categories: CategoryLabels::default(),
                ui: UiConfig::default(),
            },
            tasks: seed::initial_tasks(),
            completed: IndexMap::new(),
            memos: IndexMap::new(),
            links: seed::default_links(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_tasks_for_date_preserves_insertion_order() {
        let plan = seeded_plan();
        let ids: Vec<_> = tasks_for_date(&plan, date("2025-07-01"))
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["A-01", "B-01", "D-01"]);
    }

    #[test]
    fn test_tasks_for_empty_date() {
        let plan = seeded_plan();
        assert!(tasks_for_date(&plan, date("2025-07-05")).is_empty());
    }

    #[test]
    fn test_overdue_on_start_date_is_empty() {
        let plan = seeded_plan();
        assert!(overdue_tasks(&plan, date("2025-07-01")).is_empty());
    }

    #[test]
    fn test_overdue_excludes_completed() {
        let mut plan = seeded_plan();
        let ids: Vec<_> = overdue_tasks(&plan, date("2025-07-02"))
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["A-01", "B-01", "D-01"]);

        toggle_complete(&mut plan, "B-01");
        let ids: Vec<_> = overdue_tasks(&plan, date("2025-07-02"))
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["A-01", "D-01"]);
    }

    #[test]
    fn test_toggle_first_time_completes() {
        let mut plan = seeded_plan();
        assert!(toggle_complete(&mut plan, "A-01"));
        assert!(plan.is_completed("A-01"));
    }

    #[test]
    fn test_double_toggle_restores_prior_state() {
        let mut plan = seeded_plan();
        toggle_complete(&mut plan, "A-01");
        toggle_complete(&mut plan, "A-01");
        assert!(!plan.is_completed("A-01"));
        // The entry stays (false), matching first-toggle-after semantics
        assert!(plan.completed.contains_key("A-01"));
        assert_eq!(plan.progress().completed, 0);
    }

    #[test]
    fn test_add_task_assigns_next_category_id() {
        let mut plan = seeded_plan();
        let id = add_task(
            &mut plan,
            "追加の作業",
            Category::D,
            "追加タスク",
            date("2025-07-05"),
        );
        // D has 4 seeded tasks
        assert_eq!(id.as_deref(), Some("D-05"));
        assert_eq!(plan.tasks.len(), 22);
        let task = plan.find_task("D-05").unwrap();
        assert_eq!(task.date, date("2025-07-05"));
        assert_eq!(task.phase, "追加タスク");
    }

    #[test]
    fn test_add_task_empty_content_is_noop() {
        let mut plan = seeded_plan();
        assert_eq!(add_task(&mut plan, "", Category::A, "p", date("2025-07-01")), None);
        assert_eq!(
            add_task(&mut plan, "   \t ", Category::A, "p", date("2025-07-01")),
            None
        );
        assert_eq!(plan.tasks.len(), 21);
    }

    #[test]
    fn test_add_task_trims_content() {
        let mut plan = seeded_plan();
        let id = add_task(
            &mut plan,
            "  内容  ",
            Category::B,
            "p",
            date("2025-07-02"),
        )
        .unwrap();
        assert_eq!(plan.find_task(&id).unwrap().content, "内容");
    }

    #[test]
    fn test_next_task_id_bumps_past_collisions() {
        let mut plan = seeded_plan();
        // Force a collision: seed already has A-01..A-07; add A-08 manually
        plan.tasks.push(Task::new(
            "A-08",
            date("2025-07-09"),
            "x",
            Category::A,
            "p",
        ));
        assert_eq!(next_task_id(&plan, Category::A), "A-09");
    }

    #[test]
    fn test_set_memo_upserts_and_clears() {
        let mut plan = seeded_plan();
        set_memo(&mut plan, "A-01", "業者に連絡済み");
        assert_eq!(plan.memo("A-01"), Some("業者に連絡済み"));

        set_memo(&mut plan, "A-01", "折返し待ち");
        assert_eq!(plan.memo("A-01"), Some("折返し待ち"));

        set_memo(&mut plan, "A-01", "");
        assert_eq!(plan.memo("A-01"), None);
        assert!(!plan.memos.contains_key("A-01"));
    }

    #[test]
    fn test_progress_matches_seeded_example() {
        let mut plan = seeded_plan();
        let p = plan.progress();
        assert_eq!((p.completed, p.total, p.percentage), (0, 21, 0));

        toggle_complete(&mut plan, "A-01");
        assert_eq!(plan.progress().percentage, 5);
    }
}
