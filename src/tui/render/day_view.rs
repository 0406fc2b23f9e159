use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::cli::output::format_display_date;
use crate::model::task::Task;
use crate::ops::link_ops;
use crate::tui::app::App;

use super::{display_width, pad_line};

/// Render the day view: date header, task list, progress summary.
pub fn render_day_view(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // date header
            Constraint::Min(1),    // task list
            Constraint::Length(3), // progress
        ])
        .split(area);

    render_date_header(frame, app, chunks[0]);
    render_task_list(frame, app, chunks[1]);
    render_progress(frame, app, chunks[2]);
}

fn render_date_header(frame: &mut Frame, app: &App, area: Rect) {
    let date_text = format!("◀  {}  ▶", format_display_date(app.date));
    let width = area.width as usize;
    let pad = width.saturating_sub(display_width(&date_text)) / 2;

    // Navigable background links, like the original page header
    let links = link_ops::nav_links(&app.plan);
    let links_line = if links.is_empty() {
        Line::from("")
    } else {
        let mut spans = vec![Span::styled(" 資料:", Style::default().fg(app.theme.dim))];
        for link in links {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                link.name.clone(),
                Style::default().fg(app.theme.cyan),
            ));
        }
        Line::from(spans)
    };

    let date_line = Line::from(vec![
        Span::raw(" ".repeat(pad)),
        Span::styled(
            date_text,
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let today_marker = if app.date == app.today() {
        Line::from(Span::styled(
            format!("{:>width$}", "今日", width = width.saturating_sub(1)),
            Style::default().fg(app.theme.green),
        ))
    } else {
        Line::from("")
    };

    let lines = vec![links_line, date_line, today_marker];
    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn render_task_list(frame: &mut Frame, app: &App, area: Rect) {
    let tasks = app.day_tasks();

    if tasks.is_empty() {
        let empty = Paragraph::new(" 本日のタスクはありません")
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let visible_height = area.height as usize;
    let scroll = app.day_cursor.saturating_sub(visible_height.saturating_sub(1));

    let lines: Vec<Line> = tasks
        .iter()
        .enumerate()
        .skip(scroll)
        .take(visible_height)
        .map(|(i, task)| task_row(app, task, i == app.day_cursor, area.width))
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

/// Build one task row: checkbox, category-colored id badge, phase, memo
/// marker, content.
pub(super) fn task_row<'a>(app: &App, task: &'a Task, is_cursor: bool, width: u16) -> Line<'a> {
    let done = app.plan.is_completed(&task.id);
    let bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };

    let checkbox = if done {
        Span::styled("[x]", Style::default().fg(app.theme.green).bg(bg))
    } else {
        Span::styled("[ ]", Style::default().fg(app.theme.dim).bg(bg))
    };

    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg)), checkbox];
    spans.push(Span::styled(" ", Style::default().bg(bg)));
    spans.push(Span::styled(
        task.id.clone(),
        Style::default()
            .fg(app.theme.category_color(task.category))
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(" ", Style::default().bg(bg)));
    spans.push(Span::styled(
        task.phase.clone(),
        Style::default().fg(app.theme.dim).bg(bg),
    ));
    spans.push(Span::styled("  ", Style::default().bg(bg)));

    let mut content_style = Style::default().bg(bg);
    content_style = if done {
        content_style
            .fg(app.theme.dim)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if is_cursor {
        content_style.fg(app.theme.text_bright)
    } else {
        content_style.fg(app.theme.text)
    };
    spans.push(Span::styled(task.content.clone(), content_style));

    if app.plan.memo(&task.id).is_some() {
        spans.push(Span::styled(
            " ✎",
            Style::default().fg(app.theme.cyan).bg(bg),
        ));
    }

    if is_cursor {
        pad_line(&mut spans, width, bg);
    }
    Line::from(spans)
}

fn render_progress(frame: &mut Frame, app: &App, area: Rect) {
    let progress = app.plan.progress();
    let width = area.width as usize;

    let stats = format!(
        " 全体進捗  {}/{} ({}%)",
        progress.completed, progress.total, progress.percentage
    );
    let mut stats_spans = vec![Span::styled(
        stats,
        Style::default().fg(app.theme.text_bright),
    )];
    // Start / planned-end dates, right-aligned when configured
    if let (Some(start), Some(end)) = (
        app.plan.config.plan.start_date,
        app.plan.config.plan.end_date,
    ) {
        let dates = format!("開始: {}  完了予定: {} ", start, end);
        let used: usize = stats_spans.iter().map(|s| display_width(&s.content)).sum();
        let dates_width = display_width(&dates);
        if used + dates_width < width {
            stats_spans.push(Span::raw(" ".repeat(width - used - dates_width)));
            stats_spans.push(Span::styled(dates, Style::default().fg(app.theme.dim)));
        }
    }

    // Progress bar in unicode blocks
    let bar_width = width.saturating_sub(2);
    let filled = (bar_width * progress.percentage as usize / 100).min(bar_width);
    let bar = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            "█".repeat(filled),
            Style::default().fg(app.theme.highlight),
        ),
        Span::styled(
            "░".repeat(bar_width - filled),
            Style::default().fg(app.theme.dim),
        ),
    ]);

    let lines = vec![Line::from(""), Line::from(stats_spans), bar];
    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}
