//! Menuforge - terminal editor for kiosk radial-menu configurations.
//!
//! Loads a content catalog (`menu_data.json`) and flow document
//! (`menu_flow.json`), opens the interactive editor by default, and offers
//! scriptable subcommands for inspection, validation, and export.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use menuforge::cli::{ExportArgs, InspectArgs, ValidateArgs};
use menuforge::config::Config;
use menuforge::constants::APP_NAME;
use menuforge::{parser, tui};

/// Menuforge - terminal editor for kiosk radial-menu configurations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the content catalog (menu_data.json)
    #[arg(short, long, value_name = "FILE")]
    content: Option<PathBuf>,

    /// Path to the flow document (menu_flow.json)
    #[arg(short, long, value_name = "FILE")]
    flow: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the resolved menu tree
    Inspect(InspectArgs),
    /// Validate a document pair
    Validate(ValidateArgs),
    /// Export a normalized document pair
    Export(ExportArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        let result = match command {
            Commands::Inspect(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::Export(args) => args.execute(),
        };
        if let Err(e) = result {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code().code());
        }
        return;
    }

    if let Err(e) = run_editor(cli.content, cli.flow) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Loads the document pair and runs the interactive editor.
fn run_editor(content_path: Option<PathBuf>, flow_path: Option<PathBuf>) -> anyhow::Result<()> {
    let Some(content_path) = content_path else {
        anyhow::bail!(
            "{APP_NAME} needs a document pair to edit.\n\n\
             Usage:\n  menuforge --content menu_data.json --flow menu_flow.json\n\n\
             For headless commands, see: menuforge --help"
        );
    };
    let Some(flow_path) = flow_path else {
        anyhow::bail!("Missing --flow: the flow document (menu_flow.json) is required");
    };

    let content = parser::load_menu_data(&content_path)?;
    let flow = parser::load_menu_flow(&flow_path)?;

    let config = Config::load().unwrap_or_else(|_| Config::default());

    // Exports default to the directory the documents were loaded from
    let output_dir = config
        .paths
        .export_dir
        .clone()
        .or_else(|| content_path.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut terminal = tui::setup_terminal()?;
    let mut app_state = tui::AppState::new(content, flow, config, output_dir);

    let result = tui::run_tui(&mut app_state, &mut terminal);

    tui::restore_terminal(terminal)?;

    result
}
