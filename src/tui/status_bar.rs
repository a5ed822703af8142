//! Status bar widget for messages and key hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Theme};

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar: one message line, one key hint line.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let message_line = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled(
                    "ERROR: ",
                    Style::default()
                        .fg(theme.error)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(error.clone(), Style::default().fg(theme.error)),
            ])
        } else if !state.status_message.is_empty() {
            Line::from(Span::styled(
                state.status_message.clone(),
                Style::default().fg(theme.success),
            ))
        } else {
            Line::raw("")
        };

        let hints = if state.active_popup.is_some() {
            "Esc: close popup"
        } else {
            "↑/↓: navigate | Enter: expand | a: add | A: add top-level | e: edit | d: delete | c: color | t: settings | x: export | q: quit"
        };
        let help_line = Line::from(Span::styled(hints, Style::default().fg(theme.text_muted)));

        let paragraph = Paragraph::new(vec![message_line, help_line]).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.text_muted)),
        );
        f.render_widget(paragraph, area);
    }
}
