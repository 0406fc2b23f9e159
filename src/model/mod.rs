pub mod config;
pub mod link;
pub mod plan;
pub mod task;

pub use config::{CategoryLabels, PlanConfig, PlanInfo, UiConfig};
pub use link::{BackgroundLink, LinkField};
pub use plan::{Plan, Progress};
pub use task::{Category, Task};
