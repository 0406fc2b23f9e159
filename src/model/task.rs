use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task category. Ids are prefixed with the category letter
/// (`A-01`, `B-03`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    A,
    B,
    C,
    D,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::A, Category::B, Category::C, Category::D];

    /// The letter used in task ids
    pub fn letter(self) -> char {
        match self {
            Category::A => 'A',
            Category::B => 'B',
            Category::C => 'C',
            Category::D => 'D',
        }
    }

    /// Parse a category letter (case-insensitive)
    pub fn from_letter(c: char) -> Option<Category> {
        match c.to_ascii_uppercase() {
            'A' => Some(Category::A),
            'B' => Some(Category::B),
            'C' => Some(Category::C),
            'D' => Some(Category::D),
            _ => None,
        }
    }

    /// Default display label. Overridable via `[categories]` in plan.toml.
    pub fn default_label(self) -> &'static str {
        match self {
            Category::A => "飼育関連",
            Category::B => "認証関連",
            Category::C => "設備関連",
            Category::D => "データ関連",
        }
    }
}

/// A dated, categorized unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Id like `A-01`
    pub id: String,
    /// Day the task is scheduled for (ISO `YYYY-MM-DD` on disk)
    pub date: NaiveDate,
    /// Free-text content
    pub content: String,
    pub category: Category,
    /// Free-text project-stage label
    pub phase: String,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        content: impl Into<String>,
        category: Category,
        phase: impl Into<String>,
    ) -> Self {
        Task {
            id: id.into(),
            date,
            content: content.into(),
            category,
            phase: phase.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_letter_round_trip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_letter(cat.letter()), Some(cat));
        }
        assert_eq!(Category::from_letter('b'), Some(Category::B));
        assert_eq!(Category::from_letter('E'), None);
    }

    #[test]
    fn test_task_serde_uses_iso_date() {
        let task = Task::new(
            "A-01",
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            "調査",
            Category::A,
            "計画・準備",
        );
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains(r#""date":"2025-07-01""#));
        assert!(json.contains(r#""category":"A""#));
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_unknown_category_is_an_error() {
        let json = r#"{"id":"E-01","date":"2025-07-01","content":"x","category":"E","phase":"p"}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }
}
