use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::lock::PlanLock;
use crate::io::plan_io::{self, PlanError};
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::watcher::PlanWatcher;
use crate::model::link::LinkField;
use crate::model::plan::Plan;
use crate::model::task::{Category, Task};
use crate::ops::{report, task_ops};

use super::input;
use super::render;
use super::theme::Theme;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The per-day task list (home)
    Day,
    /// Tasks that slipped past their day
    Overdue,
    /// Background-link management
    Settings,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Detail modal open, editing the memo
    Memo,
    /// New-task form open
    NewTask,
    /// Editing a link field in settings
    LinkEdit,
}

/// Which field of the new-task form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Content,
    Category,
    Phase,
}

/// State of the new-task form
#[derive(Debug, Clone)]
pub struct NewTaskForm {
    pub content: String,
    pub category: Category,
    pub phase: String,
    pub field: FormField,
    /// Byte offset into the focused text field
    pub cursor: usize,
}

impl NewTaskForm {
    pub fn new() -> Self {
        NewTaskForm {
            content: String::new(),
            category: Category::A,
            phase: "追加タスク".to_string(),
            field: FormField::Content,
            cursor: 0,
        }
    }
}

/// State of the detail modal's memo editor
#[derive(Debug, Clone)]
pub struct MemoEditor {
    pub task_id: String,
    pub buffer: String,
    /// Byte offset into the buffer
    pub cursor: usize,
}

/// State of the inline link-field editor in settings
#[derive(Debug, Clone)]
pub struct LinkEditor {
    pub link_id: String,
    pub field: LinkField,
    pub buffer: String,
    pub cursor: usize,
}

/// Main application state
pub struct App {
    pub plan: Plan,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Day shown in the day view
    pub date: NaiveDate,
    pub day_cursor: usize,
    pub overdue_cursor: usize,
    pub settings_cursor: usize,
    pub show_help: bool,
    pub memo: Option<MemoEditor>,
    pub form: Option<NewTaskForm>,
    pub link_edit: Option<LinkEditor>,
    /// Transient message shown in the status row
    pub status: Option<String>,
}

impl App {
    pub fn new(plan: Plan) -> Self {
        let theme = Theme::from_config(&plan.config.ui);
        let date = task_ops::today(&plan);
        App {
            plan,
            view: View::Day,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            date,
            day_cursor: 0,
            overdue_cursor: 0,
            settings_cursor: 0,
            show_help: false,
            memo: None,
            form: None,
            link_edit: None,
            status: None,
        }
    }

    pub fn today(&self) -> NaiveDate {
        task_ops::today(&self.plan)
    }

    pub fn day_tasks(&self) -> Vec<&Task> {
        task_ops::tasks_for_date(&self.plan, self.date)
    }

    pub fn overdue_tasks(&self) -> Vec<&Task> {
        task_ops::overdue_tasks(&self.plan, self.today())
    }

    /// The task the cursor is on in the current view (if any)
    pub fn selected_task_id(&self) -> Option<String> {
        let (tasks, cursor) = match self.view {
            View::Day => (self.day_tasks(), self.day_cursor),
            View::Overdue => (self.overdue_tasks(), self.overdue_cursor),
            View::Settings => return None,
        };
        tasks.get(cursor).map(|t| t.id.clone())
    }

    /// Keep cursors inside their lists after a mutation or reload
    pub fn clamp_cursors(&mut self) {
        let day_len = self.day_tasks().len();
        self.day_cursor = self.day_cursor.min(day_len.saturating_sub(1));
        let overdue_len = self.overdue_tasks().len();
        self.overdue_cursor = self.overdue_cursor.min(overdue_len.saturating_sub(1));
        let links_len = self.plan.links.len();
        self.settings_cursor = self.settings_cursor.min(links_len.saturating_sub(1));
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    // -- mutations (each persists the touched blob immediately) --

    /// Toggle the selected task's completion and save
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let done = task_ops::toggle_complete(&mut self.plan, &id);
        self.persist(plan_io::save_completed);
        self.clamp_cursors();
        if done {
            self.set_status(format!("{} 完了", id));
        } else {
            self.set_status(format!("{} 未完了に戻しました", id));
        }
    }

    /// Open the detail modal for the selected task
    pub fn open_detail(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let buffer = self.plan.memo(&id).unwrap_or_default().to_string();
        let cursor = buffer.len();
        self.memo = Some(MemoEditor {
            task_id: id,
            buffer,
            cursor,
        });
        self.mode = Mode::Memo;
    }

    /// Save the memo editor's buffer and close the modal
    pub fn commit_memo(&mut self) {
        if let Some(editor) = self.memo.take() {
            task_ops::set_memo(&mut self.plan, &editor.task_id, &editor.buffer);
            self.persist(plan_io::save_memos);
            self.set_status("メモを保存しました");
        }
        self.mode = Mode::Navigate;
    }

    /// Submit the new-task form (whitespace-only content is rejected)
    pub fn commit_form(&mut self) {
        let Some(form) = self.form.take() else {
            self.mode = Mode::Navigate;
            return;
        };
        match task_ops::add_task(
            &mut self.plan,
            &form.content,
            form.category,
            &form.phase,
            self.date,
        ) {
            Some(id) => {
                self.persist(plan_io::save_tasks);
                self.set_status(format!("{} を追加しました", id));
                self.mode = Mode::Navigate;
            }
            None => {
                // Keep the form open; nothing was added
                self.set_status("タスクの内容を入力してください");
                self.form = Some(form);
            }
        }
    }

    /// Save the link editor's buffer back to its field
    pub fn commit_link_edit(&mut self) {
        if let Some(editor) = self.link_edit.take() {
            crate::ops::link_ops::update_link(
                &mut self.plan,
                &editor.link_id,
                editor.field,
                &editor.buffer,
            );
            self.persist(plan_io::save_links);
        }
        self.mode = Mode::Navigate;
    }

    /// Save the links blob (settings add/delete happen outside the editor)
    pub fn persist_links(&mut self) {
        self.persist(plan_io::save_links);
    }

    /// Build the progress report and place it on the clipboard.
    /// Fire-and-forget: a clipboard failure only surfaces as a status line.
    pub fn export_report(&mut self) {
        let md = report::progress_report(&self.plan);
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(md)) {
            Ok(()) => self.set_status("進捗レポートをクリップボードにコピーしました"),
            Err(_) => self.set_status("クリップボードを利用できません"),
        }
    }

    /// Reload the plan from disk (external change picked up by the watcher)
    pub fn reload_plan(&mut self) {
        match plan_io::load_plan(&self.plan.root) {
            Ok(plan) => {
                self.theme = Theme::from_config(&plan.config.ui);
                self.plan = plan;
                self.clamp_cursors();
                self.set_status("プランを再読み込みしました");
            }
            Err(e) => self.set_status(format!("再読み込み失敗: {}", e)),
        }
    }

    /// Persist one blob under the plan lock. Errors surface in the status
    /// row; the payload is already in the recovery log.
    fn persist(&mut self, save: fn(&Plan) -> Result<(), PlanError>) {
        let result = PlanLock::acquire_default(&self.plan.plan_dir)
            .map_err(|e| e.to_string())
            .and_then(|_lock| save(&self.plan).map_err(|e| e.to_string()));
        if let Err(e) = result {
            self.set_status(format!("保存に失敗しました: {}", e));
        }
    }
}

/// Restore UI state from .state.json
pub fn restore_ui_state(app: &mut App) {
    let Some(state) = read_ui_state(&app.plan.plan_dir) else {
        return;
    };

    app.view = match state.view.as_str() {
        "overdue" => View::Overdue,
        "settings" => View::Settings,
        _ => View::Day,
    };
    if let Some(date) = state.date {
        app.date = date;
    }
    app.day_cursor = state.day_cursor;
    app.overdue_cursor = state.overdue_cursor;
    app.settings_cursor = state.settings_cursor;
    app.clamp_cursors();
}

/// Save UI state to .state.json
pub fn save_ui_state(app: &App) {
    let view = match app.view {
        View::Day => "day",
        View::Overdue => "overdue",
        View::Settings => "settings",
    };
    let state = UiState {
        view: view.to_string(),
        date: Some(app.date),
        day_cursor: app.day_cursor,
        overdue_cursor: app.overdue_cursor,
        settings_cursor: app.settings_cursor,
    };
    let _ = write_ui_state(&app.plan.plan_dir, &state);
}

/// Run the TUI application
pub fn run(plan_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match plan_dir {
        Some(dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
        None => std::env::current_dir()?,
    };
    let root = plan_io::discover_plan(&start)?;
    let plan = plan_io::load_plan(&root)?;

    let mut app = App::new(plan);
    restore_ui_state(&mut app);

    // Watch the plan dir so edits from a concurrent `dp` show up live
    let watcher = PlanWatcher::start(&app.plan.plan_dir).ok();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&PlanWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        } else if let Some(watcher) = watcher {
            // Only reload while idle in navigate mode, so an external
            // change cannot clobber an open editor
            if !watcher.poll().is_empty() && app.mode == Mode::Navigate {
                app.reload_plan();
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
