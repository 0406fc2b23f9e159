use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, View};

use super::display_width;

/// Render the status row: key hints on the left, transient message on
/// the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.mode {
        Mode::Memo => " Enter:保存  Alt+Enter:改行  Esc:キャンセル",
        Mode::NewTask => " Enter:追加  Tab:項目切替  Esc:キャンセル",
        Mode::LinkEdit => " Enter:保存  Tab:項目切替  Esc:キャンセル",
        Mode::Navigate => match app.view {
            View::Day => " ←/→:日移動  x:完了  Enter:詳細  a:追加  o:期限切れ  s:設定  ?:ヘルプ",
            View::Overdue => " j/k:移動  x:完了  Enter:詳細  Esc:戻る  ?:ヘルプ",
            View::Settings => " j/k:移動  a:追加  d:削除  Esc:戻る  ?:ヘルプ",
        },
    };

    let mut spans = vec![Span::styled(hints, Style::default().fg(app.theme.dim))];

    if let Some(status) = &app.status {
        let used = display_width(hints);
        let status_width = display_width(status);
        let width = area.width as usize;
        if used + status_width + 1 < width {
            spans.push(Span::raw(" ".repeat(width - used - status_width - 1)));
            spans.push(Span::styled(
                status.clone(),
                Style::default().fg(app.theme.green),
            ));
        }
    }

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}
