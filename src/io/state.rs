use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Which view is showing ("day", "overdue", "settings")
    pub view: String,
    /// The day the day view was showing
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub day_cursor: usize,
    #[serde(default)]
    pub overdue_cursor: usize,
    #[serde(default)]
    pub settings_cursor: usize,
}

/// Read .state.json from the plan directory. Best-effort: a missing or
/// malformed file yields None.
pub fn read_ui_state(plan_dir: &Path) -> Option<UiState> {
    let path = plan_dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the plan directory
pub fn write_ui_state(plan_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = plan_dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let state = UiState {
            view: "day".into(),
            date: NaiveDate::from_ymd_opt(2025, 7, 3),
            day_cursor: 2,
            overdue_cursor: 0,
            settings_cursor: 1,
        };

        write_ui_state(dir.path(), &state).unwrap();
        let loaded = read_ui_state(dir.path()).unwrap();

        assert_eq!(loaded.view, "day");
        assert_eq!(loaded.date, NaiveDate::from_ymd_opt(2025, 7, 3));
        assert_eq!(loaded.day_cursor, 2);
        assert_eq!(loaded.settings_cursor, 1);
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn read_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".state.json"), "not json {{{").unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn serde_defaults_on_minimal_object() {
        let state: UiState = serde_json::from_str(r#"{"view":"overdue"}"#).unwrap();
        assert_eq!(state.view, "overdue");
        assert!(state.date.is_none());
        assert_eq!(state.day_cursor, 0);
    }
}
