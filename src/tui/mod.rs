//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

pub mod color_prompt;
pub mod component;
pub mod delete_confirm;
pub mod item_form;
pub mod preview;
pub mod status_bar;
pub mod theme;
pub mod tree_view;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::constants::{APP_NAME, EXPORT_DATA_FILENAME, EXPORT_FLOW_FILENAME, MAIN_MENU_KEY};
use crate::models::{FlowNode, MenuItem};
use crate::parser;
use crate::services::{MenuEditor, TreeNode};

pub use color_prompt::{ColorPrompt, ColorPromptEvent};
pub use component::Component;
pub use delete_confirm::{DeleteConfirm, DeleteConfirmEvent};
pub use item_form::{FormMode, ItemForm, ItemFormEvent};
pub use status_bar::StatusBar;
pub use theme::Theme;
pub use tree_view::{TreeRow, TreeView};

/// The currently open popup, if any.
#[derive(Debug)]
pub enum Popup {
    /// Add/edit item form.
    ItemForm(ItemForm),
    /// Delete confirmation dialog.
    DeleteConfirm(DeleteConfirm),
    /// Recolor prompt.
    ColorPrompt(ColorPrompt),
}

/// Top-level application state for the interactive editor.
pub struct AppState {
    /// The editing session.
    pub editor: MenuEditor,
    /// Loaded configuration.
    pub config: Config,
    /// Active theme.
    pub theme: Theme,
    /// Tree pane navigation state.
    pub tree: TreeView,
    /// Show the read-only settings region.
    pub show_settings: bool,
    /// Unsaved changes flag.
    pub dirty: bool,
    /// Transient status message.
    pub status_message: String,
    /// Error message, rendered until the next action.
    pub error_message: Option<String>,
    /// Currently open popup.
    pub active_popup: Option<Popup>,
    /// Directory exports are written to.
    pub output_dir: PathBuf,
    should_quit: bool,
    quit_armed: bool,
}

impl AppState {
    /// Creates the editor state from a freshly loaded document pair.
    #[must_use]
    pub fn new(
        content: Vec<MenuItem>,
        flow: FlowNode,
        config: Config,
        output_dir: PathBuf,
    ) -> Self {
        let show_settings = config.ui.show_settings_region;
        Self {
            editor: MenuEditor::new(content, flow),
            config,
            theme: Theme::dark(),
            tree: TreeView::with_expanded(&[MAIN_MENU_KEY]),
            show_settings,
            dirty: false,
            status_message: "Press a key to start editing".to_string(),
            error_message: None,
            active_popup: None,
            output_dir,
            should_quit: false,
            quit_armed: false,
        }
    }

    /// The current trees: editable main region, plus settings when shown.
    #[must_use]
    pub fn trees(&self) -> (Vec<TreeNode>, Option<Vec<TreeNode>>) {
        let main = self.editor.main_tree();
        let settings = self.show_settings.then(|| self.editor.settings_tree());
        (main, settings)
    }

    /// The current flattened row list.
    #[must_use]
    pub fn rows(&self) -> Vec<TreeRow> {
        let (main, settings) = self.trees();
        self.tree.rows(&main, settings.as_deref())
    }

    /// The row under the cursor.
    #[must_use]
    pub fn selected_row(&self) -> Option<TreeRow> {
        let rows = self.rows();
        rows.get(self.tree.selected()).cloned()
    }

    /// Sets a status message (clears any error).
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Sets an error message (clears the status).
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
        self.status_message.clear();
    }

    /// Writes the current session to `menu_data.json` and `menu_flow.json`
    /// in the output directory.
    pub fn export(&mut self) -> Result<()> {
        let (content, flow) = self.editor.export(&self.config.paths.device_root);

        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.output_dir.display()
            )
        })?;
        let data_path = self.output_dir.join(EXPORT_DATA_FILENAME);
        let flow_path = self.output_dir.join(EXPORT_FLOW_FILENAME);
        parser::save_menu_data(&data_path, &content)?;
        parser::save_menu_flow(&flow_path, &flow)?;

        self.dirty = false;
        Ok(())
    }
}

/// Set up terminal for TUI mode
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, state))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press {
                    handle_key_event(state, key)?;
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let rows = state.rows();
    state.tree.render(f, panes[0], &rows, &state.theme);

    let (main, settings) = state.trees();
    let preview_node = rows.get(state.tree.selected()).and_then(|row| {
        let lookup = |key: &str| {
            find_node(&main, key).or_else(|| settings.as_deref().and_then(|s| find_node(s, key)))
        };
        let selected = lookup(&row.key)?;
        if selected.children.is_empty() {
            row.parent_key.as_deref().and_then(lookup)
        } else {
            Some(selected)
        }
    });
    preview::render_preview(f, panes[1], preview_node, &state.theme);

    StatusBar::render(f, chunks[2], state, &state.theme);

    if let Some(popup) = &state.active_popup {
        match popup {
            Popup::ItemForm(form) => form.render(f, centered_rect(60, 50, f.area()), &state.theme),
            Popup::DeleteConfirm(dialog) => {
                dialog.render(f, centered_rect(50, 30, f.area()), &state.theme);
            }
            Popup::ColorPrompt(prompt) => {
                prompt.render(f, centered_rect(40, 20, f.area()), &state.theme);
            }
        }
    }
}

fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let dirty = if state.dirty { " [+]" } else { "" };
    let line = Line::from(vec![
        Span::styled(
            format!(" {APP_NAME} v{}", env!("CARGO_PKG_VERSION")),
            Style::default()
                .fg(state.theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(dirty, Style::default().fg(state.theme.warning)),
        Span::styled(
            format!("  →  {}", state.output_dir.display()),
            Style::default().fg(state.theme.text_muted),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn find_node<'a>(nodes: &'a [TreeNode], key: &str) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.key() == key {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, key) {
            return Some(found);
        }
    }
    None
}

/// Handle keyboard input events
fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<()> {
    use crossterm::event::KeyCode;

    if state.active_popup.is_some() {
        handle_popup_input(state, key);
        return Ok(());
    }

    if key.code != KeyCode::Char('q') {
        state.quit_armed = false;
    }

    match key.code {
        KeyCode::Char('q') => {
            if state.dirty && !state.quit_armed {
                state.quit_armed = true;
                state.set_error("Unsaved changes. Press q again to quit without exporting.");
            } else {
                state.should_quit = true;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => state.tree.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => {
            let count = state.rows().len();
            state.tree.select_next(count);
        }
        KeyCode::Enter => {
            if let Some(row) = state.selected_row() {
                if row.has_children {
                    state.tree.toggle(&row.key);
                }
            }
        }
        KeyCode::Right => {
            if let Some(row) = state.selected_row() {
                if row.has_children {
                    state.tree.expand(&row.key);
                }
            }
        }
        KeyCode::Left => {
            if let Some(row) = state.selected_row() {
                state.tree.collapse(&row.key);
            }
        }
        KeyCode::Char('t') => {
            state.show_settings = !state.show_settings;
            let count = state.rows().len();
            state.tree.clamp(count);
        }
        KeyCode::Char('a') => open_add_form(state),
        KeyCode::Char('A') => {
            state.active_popup = Some(Popup::ItemForm(ItemForm::add(
                None,
                state.editor.all_keys(),
            )));
        }
        KeyCode::Char('e') => open_edit_form(state),
        KeyCode::Char('d') => open_delete_confirm(state),
        KeyCode::Char('c') => open_color_prompt(state),
        KeyCode::Char('x') => match state.export() {
            Ok(()) => {
                let stamp = chrono::Local::now().format("%H:%M:%S");
                let target = state.output_dir.display().to_string();
                state.set_status(format!("Exported to {target} at {stamp}"));
            }
            Err(e) => state.set_error(format!("{e:#}")),
        },
        _ => {}
    }

    Ok(())
}

fn guard_editable(state: &mut AppState) -> Option<TreeRow> {
    let row = state.selected_row()?;
    if row.readonly {
        state.set_error("The settings region is read-only");
        return None;
    }
    Some(row)
}

fn open_add_form(state: &mut AppState) {
    let Some(row) = guard_editable(state) else {
        return;
    };
    if row.item_type != crate::models::ItemType::Menu {
        state.set_error(format!("'{}' is not a menu; items need a menu parent", row.key));
        return;
    }
    state.active_popup = Some(Popup::ItemForm(ItemForm::add(
        Some(row.key),
        state.editor.all_keys(),
    )));
}

fn open_edit_form(state: &mut AppState) {
    let Some(row) = guard_editable(state) else {
        return;
    };
    let Some(item) = state.editor.content_map().remove(&row.key) else {
        state.set_error(format!("'{}' has no content record to edit", row.key));
        return;
    };
    state.active_popup = Some(Popup::ItemForm(ItemForm::edit(
        &item,
        row.parent_key,
        state.editor.all_keys(),
    )));
}

fn open_delete_confirm(state: &mut AppState) {
    let Some(row) = guard_editable(state) else {
        return;
    };
    if row.key == MAIN_MENU_KEY {
        state.set_error("The main menu root cannot be deleted");
        return;
    }
    let descendant_count = state.editor.cascade_keys(&row.key).len().saturating_sub(1);
    state.active_popup = Some(Popup::DeleteConfirm(DeleteConfirm::new(
        row.key,
        row.parent_key,
        row.label,
        descendant_count,
    )));
}

fn open_color_prompt(state: &mut AppState) {
    let Some(row) = guard_editable(state) else {
        return;
    };
    let current = state
        .editor
        .content_map()
        .get(&row.key)
        .and_then(|item| item.color.clone());
    state.active_popup = Some(Popup::ColorPrompt(ColorPrompt::new(
        row.key,
        current.as_deref(),
    )));
}

fn handle_popup_input(state: &mut AppState, key: event::KeyEvent) {
    let Some(popup) = state.active_popup.take() else {
        return;
    };

    match popup {
        Popup::ItemForm(mut form) => match form.handle_input(key) {
            None => state.active_popup = Some(Popup::ItemForm(form)),
            Some(ItemFormEvent::Cancel) => {}
            Some(ItemFormEvent::Submit { item, mode }) => apply_form_submit(state, item, mode),
        },
        Popup::DeleteConfirm(mut dialog) => match dialog.handle_input(key) {
            None => state.active_popup = Some(Popup::DeleteConfirm(dialog)),
            Some(DeleteConfirmEvent::Cancel) => {}
            Some(DeleteConfirmEvent::Confirm) => {
                state
                    .editor
                    .delete_item(&dialog.item_key, dialog.parent_key.as_deref());
                state.dirty = true;
                let count = state.rows().len();
                state.tree.clamp(count);
                state.set_status(format!("Deleted '{}'", dialog.item_key));
            }
        },
        Popup::ColorPrompt(mut prompt) => match prompt.handle_input(key) {
            None => state.active_popup = Some(Popup::ColorPrompt(prompt)),
            Some(ColorPromptEvent::Cancel) => {}
            Some(ColorPromptEvent::Submit(color)) => {
                state.editor.recolor_item(&prompt.item_key, &color);
                state.dirty = true;
                state.set_status(format!("Recolored '{}' to {color}", prompt.item_key));
            }
        },
    }
}

fn apply_form_submit(state: &mut AppState, item: MenuItem, mode: FormMode) {
    let key = item.key.clone();
    let result = match &mode {
        FormMode::Add { parent_key } => {
            state.editor.add_item(item, parent_key.as_deref())
        }
        FormMode::Edit {
            original_key,
            parent_key,
        } => state
            .editor
            .edit_item(original_key, item, parent_key.as_deref()),
    };

    match result {
        Ok(()) => {
            state.dirty = true;
            match mode {
                FormMode::Add { parent_key } => {
                    if let Some(parent) = parent_key {
                        state.tree.expand(&parent);
                    }
                    state.set_status(format!("Added '{key}'"));
                }
                FormMode::Edit { original_key, .. } => {
                    state.set_status(format!("Updated '{original_key}'"));
                }
            }
        }
        Err(e) => state.set_error(format!("{e:#}")),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
