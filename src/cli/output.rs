use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::model::link::BackgroundLink;
use crate::model::plan::{Plan, Progress};
use crate::model::task::{Category, Task};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub date: NaiveDate,
    pub content: String,
    pub category: Category,
    pub phase: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

#[derive(Serialize)]
pub struct DayListJson {
    pub date: NaiveDate,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct OverdueJson {
    pub today: NaiveDate,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct ProgressJson {
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

#[derive(Serialize)]
pub struct LinkJson {
    pub id: String,
    pub name: String,
    pub url: String,
    pub navigable: bool,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    pub id: String,
    pub field: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(plan: &Plan, task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.clone(),
        date: task.date,
        content: task.content.clone(),
        category: task.category,
        phase: task.phase.clone(),
        completed: plan.is_completed(&task.id),
        memo: plan.memo(&task.id).map(|s| s.to_string()),
    }
}

pub fn link_to_json(link: &BackgroundLink) -> LinkJson {
    LinkJson {
        id: link.id.clone(),
        name: link.name.clone(),
        url: link.url.clone(),
        navigable: link.is_navigable(),
    }
}

pub fn progress_to_json(progress: Progress) -> ProgressJson {
    ProgressJson {
        completed: progress.completed,
        total: progress.total,
        percentage: progress.percentage,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as a one-line summary
pub fn format_task_line(plan: &Plan, task: &Task) -> String {
    let mark = if plan.is_completed(&task.id) { 'x' } else { ' ' };
    let memo_mark = if plan.memo(&task.id).is_some() {
        " *"
    } else {
        ""
    };
    format!(
        "[{}] {} {} ({}){}",
        mark, task.id, task.content, task.phase, memo_mark
    )
}

/// Format detailed task view
pub fn format_task_detail(plan: &Plan, task: &Task) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format_task_line(plan, task));
    lines.push(format!("date: {}", format_date_heading(task.date)));
    lines.push(format!(
        "category: {} ({})",
        task.category.letter(),
        plan.config.categories.label(task.category)
    ));
    lines.push(format!("phase: {}", task.phase));
    if let Some(memo) = plan.memo(&task.id) {
        lines.push("メモ:".to_string());
        for line in memo.lines() {
            lines.push(format!("  {}", line));
        }
    }
    lines
}

/// A date heading like `2025-07-01 (火)`
pub fn format_date_heading(date: NaiveDate) -> String {
    format!("{} ({})", date, weekday_ja(date.weekday()))
}

/// A long display date like `2025年7月1日（火曜日）`
pub fn format_display_date(date: NaiveDate) -> String {
    format!(
        "{}年{}月{}日（{}曜日）",
        date.year(),
        date.month(),
        date.day(),
        weekday_ja(date.weekday())
    )
}

pub fn weekday_ja(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "月",
        Weekday::Tue => "火",
        Weekday::Wed => "水",
        Weekday::Thu => "木",
        Weekday::Fri => "金",
        Weekday::Sat => "土",
        Weekday::Sun => "日",
    }
}

/// Parse a category letter into Category
pub fn parse_category(s: &str) -> Result<Category, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Category::from_letter(c)
            .ok_or_else(|| format!("unknown category '{}' (expected: A, B, C, D)", s)),
        _ => Err(format!("unknown category '{}' (expected: A, B, C, D)", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("A"), Ok(Category::A));
        assert_eq!(parse_category("d"), Ok(Category::D));
        assert!(parse_category("E").is_err());
        assert!(parse_category("AB").is_err());
        assert!(parse_category("").is_err());
    }

    #[test]
    fn test_format_date_heading() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert_eq!(format_date_heading(date), "2025-07-01 (火)");
    }

    #[test]
    fn test_format_display_date() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert_eq!(format_display_date(date), "2025年7月1日（火曜日）");
    }
}
