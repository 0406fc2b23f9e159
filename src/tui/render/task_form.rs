use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::tui::app::{App, FormField};

use super::{centered_rect, display_width};

/// Render the new-task form as a centered modal.
pub fn render_task_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };

    let modal = centered_rect(area.width.saturating_sub(10).min(64), 9, area);
    frame.render_widget(Clear, modal);

    let block = Block::bordered()
        .title(format!(" タスクを追加 ({}) ", app.date))
        .border_style(Style::default().fg(app.theme.highlight))
        .style(Style::default().bg(app.theme.background));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // content
            Constraint::Length(1), // category
            Constraint::Length(1), // phase
            Constraint::Length(1),
            Constraint::Length(1), // hints
        ])
        .split(inner);

    let label_style = Style::default().fg(app.theme.dim);
    let focused_style = Style::default()
        .fg(app.theme.text_bright)
        .add_modifier(Modifier::UNDERLINED);
    let value_style = Style::default().fg(app.theme.text);

    // Content field
    let content_focused = form.field == FormField::Content;
    let content_line = Line::from(vec![
        Span::styled(" 内容     ", label_style),
        Span::styled(
            if form.content.is_empty() && !content_focused {
                "タスクの内容を入力".to_string()
            } else {
                form.content.clone()
            },
            if content_focused {
                focused_style
            } else if form.content.is_empty() {
                label_style
            } else {
                value_style
            },
        ),
    ]);
    frame.render_widget(
        Paragraph::new(content_line).style(Style::default().bg(app.theme.background)),
        chunks[0],
    );

    // Category field
    let category_focused = form.field == FormField::Category;
    let label = app.plan.config.categories.label(form.category);
    let category_line = Line::from(vec![
        Span::styled(" カテゴリ ", label_style),
        Span::styled(
            format!("◀ {} - {} ▶", form.category.letter(), label),
            if category_focused {
                Style::default()
                    .fg(app.theme.category_color(form.category))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.category_color(form.category))
            },
        ),
    ]);
    frame.render_widget(
        Paragraph::new(category_line).style(Style::default().bg(app.theme.background)),
        chunks[1],
    );

    // Phase field
    let phase_focused = form.field == FormField::Phase;
    let phase_line = Line::from(vec![
        Span::styled(" フェーズ ", label_style),
        Span::styled(
            form.phase.clone(),
            if phase_focused { focused_style } else { value_style },
        ),
    ]);
    frame.render_widget(
        Paragraph::new(phase_line).style(Style::default().bg(app.theme.background)),
        chunks[2],
    );

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " Enter:追加  Tab:項目切替  Esc:キャンセル",
            Style::default().fg(app.theme.dim),
        )))
        .style(Style::default().bg(app.theme.background)),
        chunks[4],
    );

    // Terminal cursor in the focused text field
    let (row, buffer, cursor) = match form.field {
        FormField::Content => (chunks[0], &form.content, form.cursor),
        FormField::Phase => (chunks[2], &form.phase, form.cursor),
        FormField::Category => return,
    };
    let label_width = display_width(" 内容     "); // both labels pad to the same width
    let prefix_width = display_width(&buffer[..cursor]);
    frame.set_cursor_position(Position::new(
        row.x + (label_width + prefix_width) as u16,
        row.y,
    ));
}
