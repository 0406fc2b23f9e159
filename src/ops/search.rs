use regex::Regex;

use crate::model::plan::Plan;
use crate::model::task::Task;

/// Which field a search hit matched in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Id,
    Content,
    Memo,
}

impl SearchField {
    pub fn key(self) -> &'static str {
        match self {
            SearchField::Id => "id",
            SearchField::Content => "content",
            SearchField::Memo => "memo",
        }
    }
}

#[derive(Debug)]
pub struct SearchHit<'a> {
    pub task: &'a Task,
    pub field: SearchField,
}

/// Case-insensitive regex search over id, content, and memo text.
/// A pattern that fails to compile falls back to a literal match.
/// One hit per task, reporting the first field that matched.
pub fn search<'a>(plan: &'a Plan, pattern: &str) -> Vec<SearchHit<'a>> {
    let re = match compile(pattern) {
        Some(re) => re,
        None => return Vec::new(),
    };

    plan.tasks
        .iter()
        .filter_map(|task| {
            let field = if re.is_match(&task.id) {
                SearchField::Id
            } else if re.is_match(&task.content) {
                SearchField::Content
            } else if plan.memo(&task.id).is_some_and(|m| re.is_match(m)) {
                SearchField::Memo
            } else {
                return None;
            };
            Some(SearchHit { task, field })
        })
        .collect()
}

fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(&format!("(?i){}", pattern))
        .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::{CategoryLabels, PlanConfig, PlanInfo, UiConfig};
    use crate::ops::task_ops::set_memo;
    use crate::seed;
    use indexmap::IndexMap;
    use std::path::PathBuf;

    fn seeded_plan() -> Plan {
        Plan {
            root: PathBuf::from("/tmp/test"),
            plan_dir: PathBuf::from("/tmp/test/dayplan"),
            config: PlanConfig {
                plan: PlanInfo {
                    name: "test".to_string(),
                    start_date: None,
                    end_date: None,
                    today: None,
                },
                categories: CategoryLabels::default(),
                ui: UiConfig::default(),
            },
            tasks: seed::initial_tasks(),
            completed: IndexMap::new(),
            memos: IndexMap::new(),
            links: Vec::new(),
        }
    }

    #[test]
    fn test_search_by_content() {
        let plan = seeded_plan();
        let hits = search(&plan, "竹柵");
        assert_eq!(hits.len(), 5);
        assert!(hits.iter().all(|h| h.field == SearchField::Content));
    }

    #[test]
    fn test_search_by_id_is_case_insensitive() {
        let plan = seeded_plan();
        let hits = search(&plan, "a-0");
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|h| h.field == SearchField::Id));
    }

    #[test]
    fn test_search_memo() {
        let mut plan = seeded_plan();
        set_memo(&mut plan, "C-01", "設計図は棚の上");
        let hits = search(&plan, "棚の上");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].task.id, "C-01");
        assert_eq!(hits[0].field, SearchField::Memo);
    }

    #[test]
    fn test_bad_regex_falls_back_to_literal() {
        let mut plan = seeded_plan();
        set_memo(&mut plan, "A-01", "見積 (概算");
        let hits = search(&plan, "(概算");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].task.id, "A-01");
    }

    #[test]
    fn test_no_match() {
        let plan = seeded_plan();
        assert!(search(&plan, "存在しない語").is_empty());
    }
}
