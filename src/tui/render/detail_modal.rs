use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::cli::output::format_date_heading;
use crate::tui::app::App;

use super::{centered_rect, display_width};

/// Render the task-detail modal with the memo editor.
pub fn render_detail_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(editor) = &app.memo else {
        return;
    };
    let Some(task) = app.plan.find_task(&editor.task_id) else {
        return;
    };

    let modal = centered_rect(area.width.saturating_sub(10).min(72), 16, area);
    frame.render_widget(Clear, modal);

    let block = Block::bordered()
        .title(" タスク詳細 ")
        .border_style(Style::default().fg(app.theme.highlight))
        .style(Style::default().bg(app.theme.background));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // id / phase / date
            Constraint::Length(3), // content (wrapped)
            Constraint::Length(1), // memo label
            Constraint::Min(1),    // memo editor
            Constraint::Length(1), // key hints
        ])
        .split(inner);

    let meta = Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(
            task.id.clone(),
            Style::default()
                .fg(app.theme.category_color(task.category))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(task.phase.clone(), Style::default().fg(app.theme.dim)),
        Span::raw("  "),
        Span::styled(
            format_date_heading(task.date),
            Style::default().fg(app.theme.dim),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(meta).style(Style::default().bg(app.theme.background)),
        chunks[0],
    );

    let content = Paragraph::new(Line::from(Span::styled(
        format!(" {}", task.content),
        Style::default().fg(app.theme.text_bright),
    )))
    .wrap(Wrap { trim: false })
    .style(Style::default().bg(app.theme.background));
    frame.render_widget(content, chunks[1]);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " メモ",
            Style::default().fg(app.theme.cyan),
        )))
        .style(Style::default().bg(app.theme.background)),
        chunks[2],
    );

    render_memo_editor(frame, app, editor, chunks[3]);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " Enter:保存  Alt+Enter:改行  Esc:キャンセル",
            Style::default().fg(app.theme.dim),
        )))
        .style(Style::default().bg(app.theme.background)),
        chunks[4],
    );
}

fn render_memo_editor(
    frame: &mut Frame,
    app: &App,
    editor: &crate::tui::app::MemoEditor,
    area: Rect,
) {
    let lines: Vec<Line> = if editor.buffer.is_empty() {
        vec![Line::from(Span::styled(
            " このタスクに関するメモを入力してください...",
            Style::default().fg(app.theme.dim),
        ))]
    } else {
        editor
            .buffer
            .split('\n')
            .map(|line| {
                Line::from(Span::styled(
                    format!(" {}", line),
                    Style::default().fg(app.theme.text),
                ))
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);

    // Cursor position: split the buffer at the cursor, count lines and
    // measure the last line's display width
    let before = &editor.buffer[..editor.cursor];
    let line_idx = before.matches('\n').count();
    let col = before
        .rsplit_once('\n')
        .map(|(_, tail)| display_width(tail))
        .unwrap_or_else(|| display_width(before));
    if (line_idx as u16) < area.height {
        frame.set_cursor_position(Position::new(area.x + 1 + col as u16, area.y + line_idx as u16));
    }
}
