//! Small text prompt for recoloring an item.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{is_hex_color, RgbColor};
use crate::tui::component::Component;
use crate::tui::Theme;

/// Events emitted by the prompt.
#[derive(Debug, Clone)]
pub enum ColorPromptEvent {
    /// A valid hex color was entered.
    Submit(String),
    /// Prompt dismissed.
    Cancel,
}

/// Hex color input prompt.
#[derive(Debug)]
pub struct ColorPrompt {
    /// Key of the item being recolored.
    pub item_key: String,
    input: String,
    error: Option<String>,
}

impl ColorPrompt {
    /// Creates a prompt for `item_key`, pre-filled with its current color.
    #[must_use]
    pub fn new(item_key: impl Into<String>, current: Option<&str>) -> Self {
        Self {
            item_key: item_key.into(),
            input: current.unwrap_or_default().to_string(),
            error: None,
        }
    }
}

impl Component for ColorPrompt {
    type Event = ColorPromptEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        self.error = None;
        match key.code {
            KeyCode::Esc => Some(ColorPromptEvent::Cancel),
            KeyCode::Enter => {
                if is_hex_color(&self.input) {
                    Some(ColorPromptEvent::Submit(self.input.clone()))
                } else {
                    self.error = Some("Enter a color like #1a2b3c".to_string());
                    None
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let swatch = RgbColor::from_hex(&self.input)
            .map(|c| c.to_ratatui_color())
            .unwrap_or(theme.text_muted);

        let mut lines = vec![Line::from(vec![
            Span::styled("Color: ", Style::default().fg(theme.primary)),
            Span::styled(self.input.clone(), Style::default().fg(theme.text)),
            Span::raw(" "),
            Span::styled("██", Style::default().fg(swatch)),
        ])];
        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(theme.error),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter: apply | Esc: cancel",
                Style::default().fg(theme.text_muted),
            )));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Recolor '{}' ", self.item_key))
            .border_style(Style::default().fg(theme.accent));

        f.render_widget(Clear, area);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
