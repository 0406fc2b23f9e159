use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

use super::pad_line;

/// Render the overdue view: tasks that slipped past their day.
pub fn render_overdue_view(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            " ⚠ 期限切れタスク",
            Style::default()
                .fg(app.theme.red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ])
    .style(Style::default().bg(app.theme.background));
    frame.render_widget(header, chunks[0]);

    let tasks = app.overdue_tasks();
    if tasks.is_empty() {
        let empty = Paragraph::new(" 期限切れのタスクはありません")
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let visible_height = chunks[1].height as usize;
    let scroll = app
        .overdue_cursor
        .saturating_sub(visible_height.saturating_sub(1));

    let lines: Vec<Line> = tasks
        .iter()
        .enumerate()
        .skip(scroll)
        .take(visible_height)
        .map(|(i, task)| {
            let is_cursor = i == app.overdue_cursor;
            let bg = if is_cursor {
                app.theme.selection_bg
            } else {
                app.theme.background
            };
            let mut spans: Vec<Span> = vec![
                Span::styled(" ", Style::default().bg(bg)),
                Span::styled("[ ]", Style::default().fg(app.theme.dim).bg(bg)),
                Span::styled(" ", Style::default().bg(bg)),
                Span::styled(
                    task.id.clone(),
                    Style::default()
                        .fg(app.theme.category_color(task.category))
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" ", Style::default().bg(bg)),
                Span::styled(
                    task.date.to_string(),
                    Style::default().fg(app.theme.red).bg(bg),
                ),
                Span::styled("  ", Style::default().bg(bg)),
                Span::styled(
                    task.content.clone(),
                    Style::default()
                        .fg(if is_cursor {
                            app.theme.text_bright
                        } else {
                            app.theme.text
                        })
                        .bg(bg),
                ),
            ];
            if app.plan.memo(&task.id).is_some() {
                spans.push(Span::styled(
                    " ✎",
                    Style::default().fg(app.theme.cyan).bg(bg),
                ));
            }
            if is_cursor {
                pad_line(&mut spans, chunks[1].width, bg);
            }
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, chunks[1]);
}
