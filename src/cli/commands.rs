use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dp", about = concat!("[=] dayplan v", env!("CARGO_PKG_VERSION"), " - one day at a time"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different plan directory
    #[arg(short = 'C', long = "plan-dir", global = true)]
    pub plan_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new plan in the current directory
    Init(InitArgs),
    /// List tasks for a day (default: today)
    List(ListArgs),
    /// Show tasks that slipped past their day
    Overdue(OverdueArgs),
    /// Add a task
    Add(AddArgs),
    /// Flip a task's completion state
    Toggle(ToggleArgs),
    /// Show, set, or clear a task memo
    Memo(MemoArgs),
    /// Show task details
    Show(ShowArgs),
    /// Manage background reference links
    Link(LinkCmd),
    /// Show overall progress
    Progress,
    /// Print the markdown progress report
    Export(ExportArgs),
    /// Search tasks and memos by regex
    Search(SearchArgs),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Plan name (default: the seeded plan's name, or the directory name
    /// with --empty)
    #[arg(long)]
    pub name: Option<String>,
    /// Start with no tasks or links instead of the seeded schedule
    #[arg(long)]
    pub empty: bool,
    /// Reinitialize even if dayplan/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Day to list, YYYY-MM-DD (default: today)
    pub date: Option<NaiveDate>,
    /// List every task, grouped by day
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct OverdueArgs {
    /// Reference day, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task id to show
    pub id: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern to search for
    pub pattern: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task content
    pub content: String,
    /// Category letter (A, B, C, D)
    #[arg(long, default_value = "A")]
    pub category: String,
    /// Phase label
    #[arg(long, default_value = "追加タスク")]
    pub phase: String,
    /// Day to schedule for, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Task id to toggle
    pub id: String,
}

#[derive(Args)]
pub struct MemoArgs {
    /// Task id
    pub id: String,
    /// Memo text; omit to show the current memo, pass "" to clear it
    pub text: Option<String>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Also copy the report to the system clipboard
    #[arg(long)]
    pub copy: bool,
}

// ---------------------------------------------------------------------------
// Link subcommands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct LinkCmd {
    #[command(subcommand)]
    pub action: LinkAction,
}

#[derive(Subcommand)]
pub enum LinkAction {
    /// List background links
    List,
    /// Add a new (empty) link
    Add,
    /// Set a link field
    Set {
        /// Link id
        id: String,
        /// Field to set: name or url
        field: String,
        /// New value
        value: String,
    },
    /// Delete a link
    Rm {
        /// Link id
        id: String,
    },
}
