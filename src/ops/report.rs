use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::plan::Plan;
use crate::model::task::Task;

/// Render the Markdown progress report.
///
/// Tasks are grouped by date; dates ascend (NaiveDate order equals the
/// ISO-string order of the on-disk format), tasks within a date keep
/// insertion order. Multi-line memos continue at a four-space indent
/// under their `メモ:` line.
pub fn progress_report(plan: &Plan) -> String {
    let progress = plan.progress();
    let mut md = format!("# {} 進捗レポート\n\n", plan.config.plan.name);
    md.push_str(&format!(
        "## 全体進捗: {}/{} ({}%)\n\n",
        progress.completed, progress.total, progress.percentage
    ));

    let mut by_date: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
    for task in &plan.tasks {
        by_date.entry(task.date).or_default().push(task);
    }

    for (date, tasks) in &by_date {
        md.push_str(&format!("### {}\n", date));
        for task in tasks {
            let mark = if plan.is_completed(&task.id) { 'x' } else { ' ' };
            md.push_str(&format!("- [{}] **{}**: {}\n", mark, task.id, task.content));
            if let Some(memo) = plan.memo(&task.id) {
                let mut lines = memo.lines();
                if let Some(first) = lines.next() {
                    md.push_str(&format!("  - メモ: {}\n", first));
                }
                for rest in lines {
                    md.push_str(&format!("    {}\n", rest));
                }
            }
        }
        md.push('\n');
    }

    md
}
