//! Tree pane: the flattened, navigable view of the menu hierarchy.

use std::collections::HashSet;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::models::{ItemType, RgbColor};
use crate::services::TreeNode;
use crate::tui::Theme;

/// One visible row of the flattened tree.
#[derive(Debug, Clone)]
pub struct TreeRow {
    /// Key of the node this row shows.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Resolved node type.
    pub item_type: ItemType,
    /// Resolved display color (hex).
    pub display_color: String,
    /// Nesting depth, for indentation.
    pub depth: usize,
    /// Parent menu key, if any.
    pub parent_key: Option<String>,
    /// True when the node has children in the flow.
    pub has_children: bool,
    /// True when the node is currently expanded.
    pub expanded: bool,
    /// True for rows of the locked settings region.
    pub readonly: bool,
}

/// Navigable tree state: expansion set plus cursor position.
#[derive(Debug, Default)]
pub struct TreeView {
    expanded: HashSet<String>,
    selected: usize,
}

impl TreeView {
    /// Creates a tree view with the given keys pre-expanded.
    #[must_use]
    pub fn with_expanded(keys: &[&str]) -> Self {
        Self {
            expanded: keys.iter().map(ToString::to_string).collect(),
            selected: 0,
        }
    }

    /// Flattens the main tree (and optionally the settings tree) into visible
    /// rows, honoring the expansion set.
    #[must_use]
    pub fn rows(&self, main: &[TreeNode], settings: Option<&[TreeNode]>) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        for node in main {
            self.flatten(node, 0, false, &mut rows);
        }
        if let Some(settings) = settings {
            for node in settings {
                self.flatten(node, 0, true, &mut rows);
            }
        }
        rows
    }

    fn flatten(&self, node: &TreeNode, depth: usize, readonly: bool, rows: &mut Vec<TreeRow>) {
        let expanded = self.expanded.contains(node.key());
        rows.push(TreeRow {
            key: node.key().to_string(),
            label: node.item.display_label(),
            item_type: node.item.item_type(),
            display_color: node.display_color.clone(),
            depth,
            parent_key: node.parent_key.clone(),
            has_children: !node.children.is_empty(),
            expanded,
            readonly,
        });
        if expanded {
            for child in &node.children {
                self.flatten(child, depth + 1, readonly, rows);
            }
        }
    }

    /// The cursor index into the current row list.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Moves the cursor up one row.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves the cursor down one row, clamped to `row_count`.
    pub fn select_next(&mut self, row_count: usize) {
        if self.selected + 1 < row_count {
            self.selected += 1;
        }
    }

    /// Clamps the cursor after the row list shrank (e.g. after a delete).
    pub fn clamp(&mut self, row_count: usize) {
        if row_count == 0 {
            self.selected = 0;
        } else if self.selected >= row_count {
            self.selected = row_count - 1;
        }
    }

    /// Expands `key`.
    pub fn expand(&mut self, key: &str) {
        self.expanded.insert(key.to_string());
    }

    /// Collapses `key`.
    pub fn collapse(&mut self, key: &str) {
        self.expanded.remove(key);
    }

    /// Toggles expansion of `key`.
    pub fn toggle(&mut self, key: &str) {
        if !self.expanded.remove(key) {
            self.expanded.insert(key.to_string());
        }
    }

    /// Renders the tree pane.
    pub fn render(&self, f: &mut Frame, area: Rect, rows: &[TreeRow], theme: &Theme) {
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                let indent = "  ".repeat(row.depth);
                let marker = if row.item_type == ItemType::Menu {
                    if row.expanded {
                        "▾ "
                    } else {
                        "▸ "
                    }
                } else {
                    "  "
                };
                let swatch_color = RgbColor::from_hex(&row.display_color)
                    .map(|c| c.to_ratatui_color())
                    .unwrap_or(theme.text_muted);
                let text_style = if row.readonly {
                    Style::default().fg(theme.readonly)
                } else {
                    Style::default().fg(theme.text)
                };
                let name = if row.label.is_empty() {
                    row.key.clone()
                } else {
                    row.label.clone()
                };

                let mut spans = vec![
                    Span::raw(indent),
                    Span::styled(marker, Style::default().fg(theme.text_muted)),
                    Span::styled("■ ", Style::default().fg(swatch_color)),
                    Span::styled(name, text_style),
                    Span::styled(
                        format!(" ({})", row.key),
                        Style::default().fg(theme.text_muted),
                    ),
                ];
                if row.readonly {
                    spans.push(Span::styled(
                        " [locked]",
                        Style::default().fg(theme.readonly),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Menu Tree ")
                    .border_style(Style::default().fg(theme.primary)),
            )
            .highlight_style(
                Style::default()
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD),
            );

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected.min(rows.len().saturating_sub(1))));
        f.render_stateful_widget(list, area, &mut list_state);
    }
}
