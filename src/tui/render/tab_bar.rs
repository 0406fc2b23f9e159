use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, View};

use super::display_width;

/// Render the tab bar: view tabs on the left, plan name on the right,
/// separator line below.
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let overdue_count = app.overdue_tasks().len();

    let tabs = [
        (View::Day, "予定".to_string()),
        (
            View::Overdue,
            if overdue_count > 0 {
                format!("期限切れ({})", overdue_count)
            } else {
                "期限切れ".to_string()
            },
        ),
        (View::Settings, "設定".to_string()),
    ];

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (view, label) in &tabs {
        let style = if *view == app.view {
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD)
        } else if *view == View::Overdue && overdue_count > 0 {
            Style::default().fg(app.theme.red)
        } else {
            Style::default().fg(app.theme.dim)
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::raw(" "));
    }

    // Plan name, right-aligned
    let name = &app.plan.config.plan.name;
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let name_width = display_width(name);
    let width = area.width as usize;
    if used + name_width + 1 < width {
        spans.push(Span::raw(" ".repeat(width - used - name_width - 1)));
        spans.push(Span::styled(
            name.clone(),
            Style::default().fg(app.theme.highlight),
        ));
    }

    let separator = "─".repeat(area.width as usize);
    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(
            separator,
            Style::default().fg(app.theme.dim),
        )),
    ];

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}
