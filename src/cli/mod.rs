//! CLI command handlers for Menuforge.
//!
//! These provide headless, scriptable access to the engine for automation and
//! CI checks of kiosk menu exports; the interactive editor is the default
//! entry point.

pub mod common;
pub mod export;
pub mod inspect;
pub mod validate;

pub use common::ExitCode;
pub use export::ExportArgs;
pub use inspect::InspectArgs;
pub use validate::ValidateArgs;
