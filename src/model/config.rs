use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::task::Category;

/// Configuration from plan.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    pub plan: PlanInfo,
    #[serde(default)]
    pub categories: CategoryLabels,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInfo {
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Pin "today" for demos and tests; absent means the system date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Display labels per category. The mapping is total; omitted keys keep
/// their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryLabels {
    #[serde(default = "default_label_a")]
    pub a: String,
    #[serde(default = "default_label_b")]
    pub b: String,
    #[serde(default = "default_label_c")]
    pub c: String,
    #[serde(default = "default_label_d")]
    pub d: String,
}

fn default_label_a() -> String {
    Category::A.default_label().to_string()
}
fn default_label_b() -> String {
    Category::B.default_label().to_string()
}
fn default_label_c() -> String {
    Category::C.default_label().to_string()
}
fn default_label_d() -> String {
    Category::D.default_label().to_string()
}

impl Default for CategoryLabels {
    fn default() -> Self {
        CategoryLabels {
            a: default_label_a(),
            b: default_label_b(),
            c: default_label_c(),
            d: default_label_d(),
        }
    }
}

impl CategoryLabels {
    pub fn label(&self, category: Category) -> &str {
        match category {
            Category::A => &self.a,
            Category::B => &self.b,
            Category::C => &self.c,
            Category::D => &self.d,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme color overrides, hex strings keyed by theme slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Per-category badge color overrides (keys "a".."d")
    #[serde(default)]
    pub category_colors: HashMap<String, String>,
    #[serde(default)]
    pub show_key_hints: bool,
}
