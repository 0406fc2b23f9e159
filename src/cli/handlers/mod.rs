mod init;
pub use init::cmd_init;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::lock::PlanLock;
use crate::io::plan_io::{self, PlanError};
use crate::model::link::LinkField;
use crate::model::plan::Plan;
use crate::model::task::Task;
use crate::ops::task_ops::TaskError;
use crate::ops::{link_ops, report, search, task_ops};

/// Global override for the plan directory (set by -C flag)
static PLAN_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for load_plan_cwd()
    if let Some(ref dir) = cli.plan_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        PLAN_DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        // Handled in main.rs before plan discovery
        None => Ok(()),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args),

            // Read commands
            Commands::List(args) => cmd_list(args, json),
            Commands::Overdue(args) => cmd_overdue(args, json),
            Commands::Show(args) => cmd_show(args, json),
            Commands::Progress => cmd_progress(json),
            Commands::Export(args) => cmd_export(args, json),
            Commands::Search(args) => cmd_search(args, json),

            // Write commands
            Commands::Add(args) => cmd_add(args),
            Commands::Toggle(args) => cmd_toggle(args),
            Commands::Memo(args) => cmd_memo(args, json),

            // Link management
            Commands::Link(args) => cmd_link(args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_plan_cwd() -> Result<Plan, PlanError> {
    let start = match PLAN_DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(PlanError::Io)?,
    };
    let root = plan_io::discover_plan(&start)?;
    plan_io::load_plan(&root)
}

fn require_task<'a>(plan: &'a Plan, id: &str) -> Result<&'a Task, TaskError> {
    plan.find_task(id)
        .ok_or_else(|| TaskError::NotFound(id.to_string()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let plan = load_plan_cwd()?;

    if args.all {
        let mut by_date: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
        for task in &plan.tasks {
            by_date.entry(task.date).or_default().push(task);
        }

        if json {
            let days: Vec<DayListJson> = by_date
                .iter()
                .map(|(date, tasks)| DayListJson {
                    date: *date,
                    tasks: tasks.iter().map(|t| task_to_json(&plan, t)).collect(),
                })
                .collect();
            return print_json(&days);
        }

        for (date, tasks) in &by_date {
            println!("== {} ==", format_date_heading(*date));
            for task in tasks {
                println!("{}", format_task_line(&plan, task));
            }
            println!();
        }
        return Ok(());
    }

    let date = args.date.unwrap_or_else(|| task_ops::today(&plan));
    let tasks = task_ops::tasks_for_date(&plan, date);

    if json {
        return print_json(&DayListJson {
            date,
            tasks: tasks.iter().map(|t| task_to_json(&plan, t)).collect(),
        });
    }

    println!("== {} ==", format_date_heading(date));
    if tasks.is_empty() {
        println!("(no tasks)");
    }
    for task in tasks {
        println!("{}", format_task_line(&plan, task));
    }
    Ok(())
}

fn cmd_overdue(args: OverdueArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let plan = load_plan_cwd()?;
    let today = args.date.unwrap_or_else(|| task_ops::today(&plan));
    let tasks = task_ops::overdue_tasks(&plan, today);

    if json {
        return print_json(&OverdueJson {
            today,
            tasks: tasks.iter().map(|t| task_to_json(&plan, t)).collect(),
        });
    }

    if tasks.is_empty() {
        println!("no overdue tasks (as of {})", today);
        return Ok(());
    }
    for task in tasks {
        println!("{}  {}", task.date, format_task_line(&plan, task));
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let plan = load_plan_cwd()?;
    let task = require_task(&plan, &args.id)?;

    if json {
        return print_json(&task_to_json(&plan, task));
    }
    for line in format_task_detail(&plan, task) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_progress(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let plan = load_plan_cwd()?;
    let progress = plan.progress();

    if json {
        return print_json(&progress_to_json(progress));
    }
    println!(
        "{}/{} tasks done ({}%)",
        progress.completed, progress.total, progress.percentage
    );
    Ok(())
}

fn cmd_export(args: ExportArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let plan = load_plan_cwd()?;
    let md = report::progress_report(&plan);

    if args.copy {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| format!("could not open clipboard: {}", e))?;
        clipboard
            .set_text(md.clone())
            .map_err(|e| format!("could not copy to clipboard: {}", e))?;
        eprintln!("report copied to clipboard");
    }

    if json {
        return print_json(&serde_json::json!({ "markdown": md }));
    }
    print!("{}", md);
    Ok(())
}

fn cmd_search(args: SearchArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let plan = load_plan_cwd()?;
    let hits = search::search(&plan, &args.pattern);

    if json {
        let hits: Vec<SearchHitJson> = hits
            .iter()
            .map(|h| SearchHitJson {
                id: h.task.id.clone(),
                field: h.field.key().to_string(),
            })
            .collect();
        return print_json(&hits);
    }

    if hits.is_empty() {
        println!("no matches");
        return Ok(());
    }
    for hit in hits {
        println!("[{}] {}", hit.field.key(), format_task_line(&plan, hit.task));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write command handlers
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut plan = load_plan_cwd()?;
    let category = parse_category(&args.category)?;
    let date = args.date.unwrap_or_else(|| task_ops::today(&plan));

    let _lock = PlanLock::acquire_default(&plan.plan_dir)?;
    match task_ops::add_task(&mut plan, &args.content, category, &args.phase, date) {
        Some(id) => {
            plan_io::save_tasks(&plan)?;
            println!("added {} on {}", id, date);
        }
        None => println!("nothing to add: content is empty"),
    }
    Ok(())
}

fn cmd_toggle(args: ToggleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut plan = load_plan_cwd()?;
    require_task(&plan, &args.id)?;

    let _lock = PlanLock::acquire_default(&plan.plan_dir)?;
    let done = task_ops::toggle_complete(&mut plan, &args.id);
    plan_io::save_completed(&plan)?;
    if done {
        println!("{} marked done", args.id);
    } else {
        println!("{} reopened", args.id);
    }
    Ok(())
}

fn cmd_memo(args: MemoArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut plan = load_plan_cwd()?;
    require_task(&plan, &args.id)?;

    match args.text {
        None => {
            // Show
            if json {
                return print_json(&serde_json::json!({
                    "id": args.id,
                    "memo": plan.memo(&args.id),
                }));
            }
            match plan.memo(&args.id) {
                Some(memo) => println!("{}", memo),
                None => println!("(no memo)"),
            }
            Ok(())
        }
        Some(text) => {
            let _lock = PlanLock::acquire_default(&plan.plan_dir)?;
            task_ops::set_memo(&mut plan, &args.id, &text);
            plan_io::save_memos(&plan)?;
            if text.is_empty() {
                println!("memo cleared for {}", args.id);
            } else {
                println!("memo set for {}", args.id);
            }
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Link handlers
// ---------------------------------------------------------------------------

fn cmd_link(args: LinkCmd, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match args.action {
        LinkAction::List => {
            let plan = load_plan_cwd()?;
            if json {
                let links: Vec<LinkJson> = plan.links.iter().map(link_to_json).collect();
                return print_json(&links);
            }
            if plan.links.is_empty() {
                println!("no links");
            }
            for link in &plan.links {
                let marker = if link.is_navigable() { "" } else { "  (incomplete)" };
                println!("{}  {}  {}{}", link.id, link.name, link.url, marker);
            }
            Ok(())
        }
        LinkAction::Add => {
            let mut plan = load_plan_cwd()?;
            let _lock = PlanLock::acquire_default(&plan.plan_dir)?;
            let id = link_ops::add_link(&mut plan).id.clone();
            plan_io::save_links(&plan)?;
            println!("added link {}", id);
            Ok(())
        }
        LinkAction::Set { id, field, value } => {
            let mut plan = load_plan_cwd()?;
            let field = LinkField::parse(&field)
                .ok_or_else(|| format!("unknown field '{}' (expected: name, url)", field))?;
            let _lock = PlanLock::acquire_default(&plan.plan_dir)?;
            if !link_ops::update_link(&mut plan, &id, field, &value) {
                return Err(format!("link not found: {}", id).into());
            }
            plan_io::save_links(&plan)?;
            println!("set {} {}", id, field.key());
            Ok(())
        }
        LinkAction::Rm { id } => {
            let mut plan = load_plan_cwd()?;
            let _lock = PlanLock::acquire_default(&plan.plan_dir)?;
            if !link_ops::delete_link(&mut plan, &id) {
                return Err(format!("link not found: {}", id).into());
            }
            plan_io::save_links(&plan)?;
            println!("deleted link {}", id);
            Ok(())
        }
    }
}
