mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Any key dismisses the help overlay
    if app.show_help {
        app.show_help = false;
        return;
    }

    // A new key press replaces the previous status message
    app.status = None;

    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Memo => edit::handle_memo(app, key),
        Mode::NewTask => edit::handle_form(app, key),
        Mode::LinkEdit => edit::handle_link_edit(app, key),
    }
}
