//! Menuforge library.
//!
//! Core functionality for the kiosk menu editor: the content/flow document
//! models, the join and partition engine, mutation operations, file I/O, and
//! the terminal UI.

pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod parser;
pub mod services;
pub mod tui;
