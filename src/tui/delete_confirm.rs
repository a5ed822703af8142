//! Confirmation dialog for deleting an item and its descendants.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::component::Component;
use crate::tui::Theme;

/// Events emitted by the dialog.
#[derive(Debug, Clone, Copy)]
pub enum DeleteConfirmEvent {
    /// Deletion confirmed.
    Confirm,
    /// Dialog dismissed.
    Cancel,
}

/// The delete confirmation dialog.
#[derive(Debug)]
pub struct DeleteConfirm {
    /// Key of the item to delete.
    pub item_key: String,
    /// Parent menu key, threaded through to the delete operation.
    pub parent_key: Option<String>,
    label: String,
    descendant_count: usize,
}

impl DeleteConfirm {
    /// Creates a dialog for `item_key`. `descendant_count` is the number of
    /// records removed beyond the item itself.
    #[must_use]
    pub fn new(
        item_key: impl Into<String>,
        parent_key: Option<String>,
        label: impl Into<String>,
        descendant_count: usize,
    ) -> Self {
        Self {
            item_key: item_key.into(),
            parent_key,
            label: label.into(),
            descendant_count,
        }
    }
}

impl Component for DeleteConfirm {
    type Event = DeleteConfirmEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(DeleteConfirmEvent::Confirm),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(DeleteConfirmEvent::Cancel),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let name = if self.label.is_empty() {
            self.item_key.clone()
        } else {
            self.label.clone()
        };

        let mut lines = vec![
            Line::from(vec![
                Span::raw("Delete "),
                Span::styled(
                    format!("\"{name}\""),
                    Style::default()
                        .fg(theme.warning)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" ({})", self.item_key),
                    Style::default().fg(theme.text_muted),
                ),
                Span::raw("?"),
            ]),
            Line::raw(""),
        ];
        if self.descendant_count > 0 {
            lines.push(Line::from(Span::styled(
                format!(
                    "This also removes {} descendant item(s).",
                    self.descendant_count
                ),
                Style::default().fg(theme.error),
            )));
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled(
            "y/Enter: delete | n/Esc: cancel",
            Style::default().fg(theme.text_muted),
        )));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Confirm Delete ")
            .border_style(Style::default().fg(theme.error));

        f.render_widget(Clear, area);
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
    }
}
