use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_rect;

const KEYS: &[(&str, &str)] = &[
    ("←/→", "前の日 / 次の日"),
    ("g", "今日へ移動"),
    ("j/k", "カーソル移動"),
    ("x / Space", "完了の切り替え"),
    ("Enter", "タスク詳細 (メモ編集)"),
    ("a", "タスクを追加 (設定画面ではリンク追加)"),
    ("o", "期限切れタスク"),
    ("s", "設定 (背景資料リンク)"),
    ("E", "進捗レポートをコピー"),
    ("r", "再読み込み"),
    ("Esc / h", "ホームへ戻る"),
    ("q", "終了"),
];

/// Render the help overlay listing key bindings.
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let height = KEYS.len() as u16 + 2;
    let modal = centered_rect(46, height, area);
    frame.render_widget(Clear, modal);

    let block = Block::bordered()
        .title(" キー操作 ")
        .border_style(Style::default().fg(app.theme.highlight))
        .style(Style::default().bg(app.theme.background));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let lines: Vec<Line> = KEYS
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<10}", key),
                    Style::default()
                        .fg(app.theme.yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(desc.to_string(), Style::default().fg(app.theme.text)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, inner);
}
