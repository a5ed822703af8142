//! Add/edit form popup for a single menu item.

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use serde_json::Number;

use crate::models::{is_hex_color, ItemType, MenuItem};
use crate::services::generate_key;
use crate::tui::component::Component;
use crate::tui::Theme;

/// Whether the form creates a new item or rewrites an existing one.
#[derive(Debug, Clone)]
pub enum FormMode {
    /// Create a new item under `parent_key` (top-level when `None`).
    Add {
        /// Parent menu key.
        parent_key: Option<String>,
    },
    /// Rewrite the record currently keyed `original_key`.
    Edit {
        /// Key of the record being edited.
        original_key: String,
        /// Parent menu key.
        parent_key: Option<String>,
    },
}

/// Events emitted by the form.
#[derive(Debug, Clone)]
pub enum ItemFormEvent {
    /// The form was submitted with a complete item.
    Submit {
        /// The item built from the form fields.
        item: MenuItem,
        /// The mode the form was opened in.
        mode: FormMode,
    },
    /// The form was dismissed.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Label,
    Key,
    Type,
    Source,
    Color,
    ColorFactor,
}

const FIELD_ORDER: [Field; 6] = [
    Field::Label,
    Field::Key,
    Field::Type,
    Field::Source,
    Field::Color,
    Field::ColorFactor,
];

/// The add/edit item form.
#[derive(Debug)]
pub struct ItemForm {
    mode: FormMode,
    base: MenuItem,
    existing_keys: HashSet<String>,

    label: String,
    key: String,
    type_index: usize,
    source: String,
    color: String,
    color_factor: String,

    active: usize,
    key_touched: bool,
    error: Option<String>,
}

impl ItemForm {
    /// Opens the form for adding a new item.
    ///
    /// `existing_keys` is the full key set at open time, used both for live
    /// key suggestion from the label and for uniqueness validation.
    #[must_use]
    pub fn add(parent_key: Option<String>, existing_keys: HashSet<String>) -> Self {
        Self {
            mode: FormMode::Add { parent_key },
            base: MenuItem::default(),
            key: generate_key("", &existing_keys),
            existing_keys,
            label: String::new(),
            type_index: 0,
            source: String::new(),
            color: String::new(),
            color_factor: String::new(),
            active: 0,
            key_touched: false,
            error: None,
        }
    }

    /// Opens the form pre-filled from an existing record.
    #[must_use]
    pub fn edit(item: &MenuItem, parent_key: Option<String>, existing_keys: HashSet<String>) -> Self {
        let item_type = item.item_type();
        let type_index = ItemType::ALL
            .iter()
            .position(|t| *t == item_type)
            .unwrap_or(0);
        let source = match item_type {
            ItemType::Video => item.video_source.clone(),
            ItemType::Audio => item.audio_source.clone(),
            ItemType::Lottie => item.lottie_source.clone(),
            ItemType::Menu | ItemType::Plain => None,
        }
        .unwrap_or_default();

        Self {
            mode: FormMode::Edit {
                original_key: item.key.clone(),
                parent_key,
            },
            label: item.label.clone().unwrap_or_default(),
            key: item.key.clone(),
            type_index,
            source,
            color: item.color.clone().unwrap_or_default(),
            color_factor: item
                .color_factor
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            base: item.clone(),
            existing_keys,
            active: 0,
            key_touched: true,
            error: None,
        }
    }

    fn item_type(&self) -> ItemType {
        ItemType::ALL[self.type_index]
    }

    fn active_field(&self) -> Field {
        FIELD_ORDER[self.active]
    }

    fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.active_field() {
            Field::Label => Some(&mut self.label),
            Field::Key => Some(&mut self.key),
            Field::Source => Some(&mut self.source),
            Field::Color => Some(&mut self.color),
            Field::ColorFactor => Some(&mut self.color_factor),
            Field::Type => None,
        }
    }

    fn refresh_suggested_key(&mut self) {
        if matches!(self.mode, FormMode::Add { .. }) && !self.key_touched {
            self.key = generate_key(&self.label, &self.existing_keys);
        }
    }

    fn original_key(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Edit { original_key, .. } => Some(original_key),
            FormMode::Add { .. } => None,
        }
    }

    /// Builds the item, or records a field error and returns `None`.
    fn build_item(&mut self) -> Option<MenuItem> {
        if self.key.is_empty() {
            self.error = Some("Key is required".to_string());
            return None;
        }
        if self.original_key() != Some(self.key.as_str()) && self.existing_keys.contains(&self.key)
        {
            self.error = Some(format!("Key '{}' is already in use", self.key));
            return None;
        }
        if !self.color.is_empty() && !is_hex_color(&self.color) {
            self.error = Some("Color must be #rgb or #rrggbb".to_string());
            return None;
        }
        let factor = if self.color_factor.is_empty() {
            None
        } else {
            match self.color_factor.parse::<f64>().ok().and_then(Number::from_f64) {
                Some(n) => Some(n),
                None => {
                    self.error = Some("Color factor must be a number".to_string());
                    return None;
                }
            }
        };

        let mut item = self.base.clone();
        item.key = self.key.clone();
        item.label = (!self.label.is_empty()).then(|| self.label.clone());
        item.set_item_type(self.item_type());
        item.color = (!self.color.is_empty()).then(|| self.color.clone());
        item.color_factor = factor;

        item.video_source = None;
        item.audio_source = None;
        item.lottie_source = None;
        let source = (!self.source.is_empty()).then(|| self.source.clone());
        match self.item_type() {
            ItemType::Video => item.video_source = source,
            ItemType::Audio => item.audio_source = source,
            ItemType::Lottie => item.lottie_source = source,
            ItemType::Menu | ItemType::Plain => {}
        }

        Some(item)
    }
}

impl Component for ItemForm {
    type Event = ItemFormEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        self.error = None;
        match key.code {
            KeyCode::Esc => return Some(ItemFormEvent::Cancel),
            KeyCode::Enter => {
                if let Some(item) = self.build_item() {
                    return Some(ItemFormEvent::Submit {
                        item,
                        mode: self.mode.clone(),
                    });
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.active = (self.active + 1) % FIELD_ORDER.len();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.active = (self.active + FIELD_ORDER.len() - 1) % FIELD_ORDER.len();
            }
            KeyCode::Left if self.active_field() == Field::Type => {
                self.type_index = (self.type_index + ItemType::ALL.len() - 1) % ItemType::ALL.len();
            }
            KeyCode::Right if self.active_field() == Field::Type => {
                self.type_index = (self.type_index + 1) % ItemType::ALL.len();
            }
            KeyCode::Backspace => {
                let was_key = self.active_field() == Field::Key;
                if let Some(text) = self.active_text_mut() {
                    text.pop();
                }
                if was_key {
                    self.key_touched = true;
                } else if self.active_field() == Field::Label {
                    self.refresh_suggested_key();
                }
            }
            KeyCode::Char(c) => {
                let was_key = self.active_field() == Field::Key;
                if let Some(text) = self.active_text_mut() {
                    text.push(c);
                }
                if was_key {
                    self.key_touched = true;
                } else if self.active_field() == Field::Label {
                    self.refresh_suggested_key();
                }
            }
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let title = match &self.mode {
            FormMode::Add { parent_key: None } => " Add Top-Level Item ".to_string(),
            FormMode::Add {
                parent_key: Some(parent),
            } => format!(" Add Item to '{parent}' "),
            FormMode::Edit { original_key, .. } => format!(" Edit '{original_key}' "),
        };

        let field_line = |name: &str, value: &str, field: Field| {
            let style = if self.active_field() == field {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(vec![
                Span::styled(format!("{name:<14}"), Style::default().fg(theme.primary)),
                Span::styled(value.to_string(), style),
            ])
        };

        let source_label = match self.item_type() {
            ItemType::Video => "Video file",
            ItemType::Audio => "Audio file",
            ItemType::Lottie => "Lottie file",
            ItemType::Menu | ItemType::Plain => "Media file",
        };

        let mut lines = vec![
            field_line("Label", &self.label, Field::Label),
            field_line("Key", &self.key, Field::Key),
            field_line("Type", &self.item_type().to_string(), Field::Type),
            field_line(source_label, &self.source, Field::Source),
            field_line("Color", &self.color, Field::Color),
            field_line("Color factor", &self.color_factor, Field::ColorFactor),
            Line::raw(""),
        ];
        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(theme.error),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Tab: next field | ←/→: change type | Enter: save | Esc: cancel",
                Style::default().fg(theme.text_muted),
            )));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(theme.accent));

        f.render_widget(Clear, area);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
