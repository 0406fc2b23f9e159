use std::fs;

use indexmap::IndexMap;

use crate::cli::commands::InitArgs;
use crate::io::plan_io::{self, CONFIG_FILE, PLAN_DIR};
use crate::model::config::PlanConfig;
use crate::model::plan::Plan;
use crate::seed;

const PLAN_TOML_TEMPLATE: &str = r##"[plan]
name = "{name}"
{dates}# today = "2025-07-01"       # pin "today" for demos; default: system date

# --- Category labels ---
# Override the badge labels shown next to task ids.
#
# [categories]
# a = "飼育関連"
# b = "認証関連"
# c = "設備関連"
# d = "データ関連"

# --- UI Customization ---
# Uncomment and edit to override defaults.
#
# [ui]
# show_key_hints = true
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# highlight = "#FB4196"
# dim = "#7D78BF"
# red = "#FF4444"
# green = "#44FF88"
#
# [ui.category_colors]
# a = "#4488FF"
# b = "#44FF88"
# c = "#FFD700"
# d = "#CC66FF"
"##;

const SEEDED_DATES: &str = "start_date = \"2025-07-01\"\nend_date = \"2025-07-09\"\n";

/// Infer a plan name from a directory name: replace hyphens with spaces,
/// title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + &chars.collect::<String>()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let plan_dir = cwd.join(PLAN_DIR);

    if plan_dir.join(CONFIG_FILE).exists() && !args.force {
        return Err("dayplan/ already exists (use --force to reinitialize)".into());
    }

    let name = match args.name {
        Some(name) => name,
        None if args.empty => {
            let dir_name = cwd
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("dayplan");
            infer_name(dir_name)
        }
        None => seed::DEFAULT_PLAN_NAME.to_string(),
    };

    fs::create_dir_all(&plan_dir)?;

    let dates = if args.empty { "" } else { SEEDED_DATES };
    let config_text = PLAN_TOML_TEMPLATE
        .replace("{name}", &name)
        .replace("{dates}", dates);
    // Parse the generated config rather than trusting the template
    let config: PlanConfig = toml::from_str(&config_text)?;
    fs::write(plan_dir.join(CONFIG_FILE), &config_text)?;

    let (tasks, links) = if args.empty {
        (Vec::new(), Vec::new())
    } else {
        (seed::initial_tasks(), seed::default_links())
    };

    let plan = Plan {
        root: cwd,
        plan_dir,
        config,
        tasks,
        completed: IndexMap::new(),
        memos: IndexMap::new(),
        links,
    };
    plan_io::save_all(&plan)?;

    println!(
        "initialized plan \"{}\" at {} ({} tasks)",
        name,
        plan.plan_dir.display(),
        plan.tasks.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_name() {
        assert_eq!(infer_name("goose-farm"), "Goose Farm");
        assert_eq!(infer_name("plain"), "Plain");
    }

    #[test]
    fn test_template_parses_with_and_without_dates() {
        for dates in ["", SEEDED_DATES] {
            let text = PLAN_TOML_TEMPLATE
                .replace("{name}", "テスト")
                .replace("{dates}", dates);
            let config: PlanConfig = toml::from_str(&text).unwrap();
            assert_eq!(config.plan.name, "テスト");
            assert_eq!(config.plan.start_date.is_some(), !dates.is_empty());
        }
    }
}
