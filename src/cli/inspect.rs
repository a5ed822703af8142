//! Inspect command: print the joined menu tree without entering the TUI.

use crate::cli::common::{CliError, CliResult};
use crate::parser;
use crate::services::{MenuEditor, TreeNode};
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

/// Print the resolved menu tree for a document pair
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to the content catalog (menu_data.json)
    #[arg(short, long, value_name = "FILE")]
    pub content: PathBuf,

    /// Path to the flow document (menu_flow.json)
    #[arg(short, long, value_name = "FILE")]
    pub flow: PathBuf,

    /// Include the read-only settings region
    #[arg(long)]
    pub settings: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let content = parser::load_menu_data(&self.content)
            .map_err(|e| CliError::io(format!("Failed to load content: {e:#}")))?;
        let flow = parser::load_menu_flow(&self.flow)
            .map_err(|e| CliError::io(format!("Failed to load flow: {e:#}")))?;

        let editor = MenuEditor::new(content, flow);
        let main_tree = editor.main_tree();
        let settings_tree = self.settings.then(|| editor.settings_tree());

        if self.json {
            let mut output = json!({ "main": nodes_json(&main_tree) });
            if let Some(settings) = &settings_tree {
                output["settings"] = nodes_json(settings);
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&output)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            for node in &main_tree {
                print_node(node, 0);
            }
            if let Some(settings) = &settings_tree {
                println!();
                println!("Settings (read-only):");
                for node in settings {
                    print_node(node, 1);
                }
            }
        }

        Ok(())
    }
}

fn nodes_json(nodes: &[TreeNode]) -> serde_json::Value {
    nodes
        .iter()
        .map(|node| {
            json!({
                "key": node.key(),
                "label": node.item.display_label(),
                "type": node.item.item_type().to_string(),
                "color": node.display_color,
                "children": nodes_json(&node.children),
            })
        })
        .collect()
}

fn print_node(node: &TreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let label = node.item.display_label();
    let label = if label.is_empty() {
        String::new()
    } else {
        format!(" \"{label}\"")
    };
    println!(
        "{indent}{}{label} [{}] {}",
        node.key(),
        node.item.item_type(),
        node.display_color
    );
    for child in &node.children {
        print_node(child, depth + 1);
    }
}
