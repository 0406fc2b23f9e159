use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::link::{BackgroundLink, LinkField};
use crate::tui::app::{App, Mode};

use super::{display_width, pad_line};

/// Display width of the name column
const NAME_COL: usize = 32;

/// Render the settings view: the background-link list with inline editing.
pub fn render_settings_view(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Min(1),    // link list
            Constraint::Length(1), // hints
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            " 背景資料リンク",
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ])
    .style(Style::default().bg(app.theme.background));
    frame.render_widget(header, chunks[0]);

    render_link_list(frame, app, chunks[1]);

    let hints = Paragraph::new(Line::from(Span::styled(
        " a:追加  d:削除  Enter:リンク名  u:URL  Tab:項目切替  Esc:戻る",
        Style::default().fg(app.theme.dim),
    )))
    .style(Style::default().bg(app.theme.background));
    frame.render_widget(hints, chunks[2]);
}

fn render_link_list(frame: &mut Frame, app: &App, area: Rect) {
    if app.plan.links.is_empty() {
        let empty = Paragraph::new(" リンクはありません (a で追加)")
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let visible_height = area.height as usize;
    let scroll = app
        .settings_cursor
        .saturating_sub(visible_height.saturating_sub(1));

    let mut lines: Vec<Line> = Vec::new();
    for (i, link) in app
        .plan
        .links
        .iter()
        .enumerate()
        .skip(scroll)
        .take(visible_height)
    {
        let is_cursor = i == app.settings_cursor;
        let row_y = area.y + (i - scroll) as u16;
        lines.push(link_row(frame, app, link, is_cursor, area, row_y));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn link_row<'a>(
    frame: &mut Frame,
    app: &App,
    link: &'a BackgroundLink,
    is_cursor: bool,
    area: Rect,
    row_y: u16,
) -> Line<'a> {
    let bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };

    let editing = match (&app.link_edit, app.mode) {
        (Some(editor), Mode::LinkEdit) if editor.link_id == link.id => Some(editor),
        _ => None,
    };

    let name_editing = editing.is_some_and(|e| e.field == LinkField::Name);
    let url_editing = editing.is_some_and(|e| e.field == LinkField::Url);

    let name_text = if name_editing {
        // just matched name_editing
        editing.unwrap().buffer.clone()
    } else {
        link.name.clone()
    };
    let url_text = if url_editing {
        editing.unwrap().buffer.clone()
    } else {
        link.url.clone()
    };

    let name_style = if name_editing {
        Style::default().fg(app.theme.text_bright).bg(bg).add_modifier(Modifier::UNDERLINED)
    } else if link.is_navigable() {
        Style::default().fg(app.theme.text_bright).bg(bg)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    let url_style = if url_editing {
        Style::default().fg(app.theme.cyan).bg(bg).add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };

    // Place the terminal cursor inside the field being edited
    if let Some(editor) = editing {
        let prefix_width = display_width(&editor.buffer[..editor.cursor]);
        let field_x = match editor.field {
            LinkField::Name => 1,
            LinkField::Url => 1 + NAME_COL + 2,
        };
        frame.set_cursor_position(Position::new(
            area.x + (field_x + prefix_width) as u16,
            row_y,
        ));
    }

    let name_pad = NAME_COL.saturating_sub(display_width(&name_text));
    let marker = if link.is_navigable() { "" } else { " (未設定)" };

    let mut spans: Vec<Span> = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(name_text, name_style),
        Span::styled(" ".repeat(name_pad + 2), Style::default().bg(bg)),
        Span::styled(url_text, url_style),
        Span::styled(marker, Style::default().fg(app.theme.yellow).bg(bg)),
    ];
    if is_cursor {
        pad_line(&mut spans, area.width, bg);
    }
    Line::from(spans)
}
