pub mod day_view;
pub mod detail_modal;
pub mod help_overlay;
pub mod overdue_view;
pub mod settings_view;
pub mod status_row;
pub mod tab_bar;
pub mod task_form;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Block;
use unicode_width::UnicodeWidthStr;

use super::app::{App, Mode, View};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    match app.view {
        View::Day => day_view::render_day_view(frame, app, chunks[1]),
        View::Overdue => overdue_view::render_overdue_view(frame, app, chunks[1]),
        View::Settings => settings_view::render_settings_view(frame, app, chunks[1]),
    }

    // Modals (rendered on top of the content)
    match app.mode {
        Mode::Memo => detail_modal::render_detail_modal(frame, app, frame.area()),
        Mode::NewTask => task_form::render_task_form(frame, app, frame.area()),
        _ => {}
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Terminal display width of a string (CJK-aware)
pub(super) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pad a span list with trailing spaces so a row background reaches the
/// right edge
pub(super) fn pad_line(spans: &mut Vec<Span<'_>>, width: u16, bg: Color) {
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let width = width as usize;
    if content_width < width {
        spans.push(Span::styled(
            " ".repeat(width - content_width),
            Style::default().bg(bg),
        ));
    }
}

/// A centered rect of the given size, clamped to `area`
pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}
