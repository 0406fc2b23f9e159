use crossterm::event::{KeyCode, KeyEvent};

use crate::model::link::LinkField;
use crate::ops::link_ops;
use crate::tui::app::{App, LinkEditor, Mode, NewTaskForm, View};

pub fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Keys shared by every view
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
            return;
        }
        KeyCode::Char('o') => {
            app.view = View::Overdue;
            app.clamp_cursors();
            return;
        }
        KeyCode::Char('s') => {
            app.view = View::Settings;
            app.clamp_cursors();
            return;
        }
        KeyCode::Char('E') => {
            app.export_report();
            return;
        }
        KeyCode::Char('r') => {
            app.reload_plan();
            return;
        }
        _ => {}
    }

    match app.view {
        View::Day => handle_day(app, key),
        View::Overdue => handle_overdue(app, key),
        View::Settings => handle_settings(app, key),
    }
}

fn handle_day(app: &mut App, key: KeyEvent) {
    let task_count = app.day_tasks().len();
    match key.code {
        KeyCode::Left => {
            if let Some(prev) = app.date.pred_opt() {
                app.date = prev;
                app.day_cursor = 0;
            }
        }
        KeyCode::Right => {
            if let Some(next) = app.date.succ_opt() {
                app.date = next;
                app.day_cursor = 0;
            }
        }
        KeyCode::Char('g') => {
            app.date = app.today();
            app.day_cursor = 0;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if task_count > 0 && app.day_cursor + 1 < task_count {
                app.day_cursor += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.day_cursor = app.day_cursor.saturating_sub(1);
        }
        KeyCode::Char('x') | KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Enter => app.open_detail(),
        KeyCode::Char('a') => {
            app.form = Some(NewTaskForm::new());
            app.mode = Mode::NewTask;
        }
        _ => {}
    }
}

fn handle_overdue(app: &mut App, key: KeyEvent) {
    let task_count = app.overdue_tasks().len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('h') => {
            app.view = View::Day;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if task_count > 0 && app.overdue_cursor + 1 < task_count {
                app.overdue_cursor += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.overdue_cursor = app.overdue_cursor.saturating_sub(1);
        }
        KeyCode::Char('x') | KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Enter => app.open_detail(),
        _ => {}
    }
}

fn handle_settings(app: &mut App, key: KeyEvent) {
    let link_count = app.plan.links.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('h') => {
            app.view = View::Day;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if link_count > 0 && app.settings_cursor + 1 < link_count {
                app.settings_cursor += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_cursor = app.settings_cursor.saturating_sub(1);
        }
        KeyCode::Char('a') => {
            link_ops::add_link(&mut app.plan);
            app.settings_cursor = app.plan.links.len() - 1;
            app.persist_links();
            open_link_editor(app, LinkField::Name);
        }
        KeyCode::Char('d') => {
            if let Some(link) = app.plan.links.get(app.settings_cursor) {
                let id = link.id.clone();
                link_ops::delete_link(&mut app.plan, &id);
                app.persist_links();
                app.clamp_cursors();
                app.set_status("リンクを削除しました");
            }
        }
        KeyCode::Enter => open_link_editor(app, LinkField::Name),
        KeyCode::Char('u') => open_link_editor(app, LinkField::Url),
        _ => {}
    }
}

pub(super) fn open_link_editor(app: &mut App, field: LinkField) {
    let Some(link) = app.plan.links.get(app.settings_cursor) else {
        return;
    };
    let buffer = match field {
        LinkField::Name => link.name.clone(),
        LinkField::Url => link.url.clone(),
    };
    let cursor = buffer.len();
    app.link_edit = Some(LinkEditor {
        link_id: link.id.clone(),
        field,
        buffer,
        cursor,
    });
    app.mode = Mode::LinkEdit;
}
