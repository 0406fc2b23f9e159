use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;

use crate::model::link::LinkField;
use crate::model::task::Category;
use crate::tui::app::{App, FormField, Mode};

/// Byte offset of the grapheme boundary before `cursor`
fn prev_boundary(s: &str, cursor: usize) -> usize {
    s[..cursor]
        .grapheme_indices(true)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the grapheme boundary after `cursor`
fn next_boundary(s: &str, cursor: usize) -> usize {
    s[cursor..]
        .graphemes(true)
        .next()
        .map(|g| cursor + g.len())
        .unwrap_or(s.len())
}

/// Apply a key to a single text buffer. Returns true if handled.
fn handle_text_key(buffer: &mut String, cursor: &mut usize, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.insert(*cursor, c);
            *cursor += c.len_utf8();
            true
        }
        KeyCode::Backspace => {
            if *cursor > 0 {
                let prev = prev_boundary(buffer, *cursor);
                buffer.replace_range(prev..*cursor, "");
                *cursor = prev;
            }
            true
        }
        KeyCode::Delete => {
            if *cursor < buffer.len() {
                let next = next_boundary(buffer, *cursor);
                buffer.replace_range(*cursor..next, "");
            }
            true
        }
        KeyCode::Left => {
            *cursor = prev_boundary(buffer, *cursor);
            true
        }
        KeyCode::Right => {
            *cursor = next_boundary(buffer, *cursor);
            true
        }
        KeyCode::Home => {
            *cursor = 0;
            true
        }
        KeyCode::End => {
            *cursor = buffer.len();
            true
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Memo editor (detail modal)
// ---------------------------------------------------------------------------

pub fn handle_memo(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            // Cancel: discard edits
            app.memo = None;
            app.mode = Mode::Navigate;
            return;
        }
        KeyCode::Enter if !key.modifiers.contains(KeyModifiers::ALT) => {
            app.commit_memo();
            return;
        }
        _ => {}
    }

    let Some(editor) = &mut app.memo else {
        return;
    };
    if key.code == KeyCode::Enter {
        // Alt+Enter inserts a newline
        editor.buffer.insert(editor.cursor, '\n');
        editor.cursor += 1;
        return;
    }
    let mut cursor = editor.cursor;
    handle_text_key(&mut editor.buffer, &mut cursor, key);
    editor.cursor = cursor;
}

// ---------------------------------------------------------------------------
// New-task form
// ---------------------------------------------------------------------------

fn next_field(field: FormField) -> FormField {
    match field {
        FormField::Content => FormField::Category,
        FormField::Category => FormField::Phase,
        FormField::Phase => FormField::Content,
    }
}

fn prev_field(field: FormField) -> FormField {
    match field {
        FormField::Content => FormField::Phase,
        FormField::Category => FormField::Content,
        FormField::Phase => FormField::Category,
    }
}

fn cycle_category(category: Category, forward: bool) -> Category {
    let all = Category::ALL;
    let idx = all.iter().position(|c| *c == category).unwrap_or(0);
    let next = if forward {
        (idx + 1) % all.len()
    } else {
        (idx + all.len() - 1) % all.len()
    };
    all[next]
}

pub fn handle_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.form = None;
            app.mode = Mode::Navigate;
            return;
        }
        KeyCode::Enter => {
            app.commit_form();
            return;
        }
        _ => {}
    }

    let Some(form) = &mut app.form else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            form.field = next_field(form.field);
            form.cursor = focused_len(form);
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.field = prev_field(form.field);
            form.cursor = focused_len(form);
        }
        _ => match form.field {
            FormField::Content => {
                let mut cursor = form.cursor;
                handle_text_key(&mut form.content, &mut cursor, key);
                form.cursor = cursor;
            }
            FormField::Phase => {
                let mut cursor = form.cursor;
                handle_text_key(&mut form.phase, &mut cursor, key);
                form.cursor = cursor;
            }
            FormField::Category => match key.code {
                KeyCode::Left => form.category = cycle_category(form.category, false),
                KeyCode::Right => form.category = cycle_category(form.category, true),
                KeyCode::Char(c) => {
                    if let Some(category) = Category::from_letter(c) {
                        form.category = category;
                    }
                }
                _ => {}
            },
        },
    }
}

fn focused_len(form: &crate::tui::app::NewTaskForm) -> usize {
    match form.field {
        FormField::Content => form.content.len(),
        FormField::Phase => form.phase.len(),
        FormField::Category => 0,
    }
}

// ---------------------------------------------------------------------------
// Link field editor (settings)
// ---------------------------------------------------------------------------

pub fn handle_link_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            // Cancel: discard edits
            app.link_edit = None;
            app.mode = Mode::Navigate;
            return;
        }
        KeyCode::Enter => {
            app.commit_link_edit();
            return;
        }
        KeyCode::Tab => {
            // Commit this field, then edit the other one
            let other = app.link_edit.as_ref().map(|e| match e.field {
                LinkField::Name => LinkField::Url,
                LinkField::Url => LinkField::Name,
            });
            app.commit_link_edit();
            if let Some(field) = other {
                super::navigate::open_link_editor(app, field);
            }
            return;
        }
        _ => {}
    }

    let Some(editor) = &mut app.link_edit else {
        return;
    };
    let mut cursor = editor.cursor;
    handle_text_key(&mut editor.buffer, &mut cursor, key);
    editor.cursor = cursor;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_respect_multibyte() {
        let s = "あmい";
        assert_eq!(next_boundary(s, 0), 3);
        assert_eq!(next_boundary(s, 3), 4);
        assert_eq!(prev_boundary(s, s.len()), 4);
        assert_eq!(prev_boundary(s, 3), 0);
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut buffer = "調査".to_string();
        let mut cursor = buffer.len();
        let key = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        assert!(handle_text_key(&mut buffer, &mut cursor, key));
        assert_eq!(buffer, "調");
        assert_eq!(cursor, buffer.len());
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut buffer = "ab".to_string();
        let mut cursor = 1;
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        handle_text_key(&mut buffer, &mut cursor, key);
        assert_eq!(buffer, "axb");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_cycle_category_wraps() {
        assert_eq!(cycle_category(Category::A, true), Category::B);
        assert_eq!(cycle_category(Category::D, true), Category::A);
        assert_eq!(cycle_category(Category::A, false), Category::D);
    }
}
