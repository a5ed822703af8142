//! Export command: re-export a document pair with normalized media paths.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::constants::{EXPORT_DATA_FILENAME, EXPORT_FLOW_FILENAME};
use crate::parser;
use crate::services::MenuEditor;
use clap::Args;
use std::path::PathBuf;

/// Export the document pair (menu_data.json + menu_flow.json)
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Path to the content catalog (menu_data.json)
    #[arg(short, long, value_name = "FILE")]
    pub content: PathBuf,

    /// Path to the flow document (menu_flow.json)
    #[arg(short, long, value_name = "FILE")]
    pub flow: PathBuf,

    /// Output directory (defaults to the configured export directory, else
    /// the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Device media root used to normalize media source paths
    #[arg(long, value_name = "PATH")]
    pub device_root: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        let content = parser::load_menu_data(&self.content)
            .map_err(|e| CliError::io(format!("Failed to load content: {e:#}")))?;
        let flow = parser::load_menu_flow(&self.flow)
            .map_err(|e| CliError::io(format!("Failed to load flow: {e:#}")))?;

        let config = Config::load().unwrap_or_default();
        let device_root = self
            .device_root
            .clone()
            .unwrap_or(config.paths.device_root);
        let output_dir = self
            .output
            .clone()
            .or(config.paths.export_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        std::fs::create_dir_all(&output_dir).map_err(|e| {
            CliError::io(format!(
                "Failed to create output directory {}: {e}",
                output_dir.display()
            ))
        })?;

        // Split and recombine so the export shape matches an edit session's,
        // whatever the input arrangement was
        let editor = MenuEditor::new(content, flow);
        let (exported_content, exported_flow) = editor.export(&device_root);

        let data_path = output_dir.join(EXPORT_DATA_FILENAME);
        let flow_path = output_dir.join(EXPORT_FLOW_FILENAME);

        parser::save_menu_data(&data_path, &exported_content)
            .map_err(|e| CliError::io(format!("{e:#}")))?;
        parser::save_menu_flow(&flow_path, &exported_flow)
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        println!("Exported {}", data_path.display());
        println!("Exported {}", flow_path.display());

        Ok(())
    }
}
