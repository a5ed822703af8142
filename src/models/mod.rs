//! Data model for the menu editor.
//!
//! The persisted state is a flat content catalog (`MenuItem` records keyed by
//! a globally unique string) plus a nested flow document (`FlowNode`) that
//! carries structure only. Everything renderable is derived from the two.

pub mod content;
pub mod flow;
pub mod rgb;

pub use content::{ItemType, MenuItem, OptionRef};
pub use flow::FlowNode;
pub use rgb::{is_hex_color, resolve_color, RgbColor};
