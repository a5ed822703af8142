//! File parsing and serialization for the menu document pair.

pub mod menu_json;

pub use menu_json::{load_menu_data, load_menu_flow, save_menu_data, save_menu_flow};
