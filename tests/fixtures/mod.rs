//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Some fixtures reserved for future tests

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A small but representative document pair: an editable main region with an
/// audio sub-menu and a leaf, plus a settings region with one settings page.
pub const SAMPLE_CONTENT: &str = r##"[
    {
        "key": "main_menu",
        "centerLabel": "Main",
        "is_menu": true,
        "color": "#c86432",
        "options": [
            { "key": "audio_menu", "label": "Audio", "color": "#3264c8" }
        ]
    },
    {
        "key": "audio_menu",
        "centerLabel": "Audio",
        "is_menu": true,
        "color": "#3264c8",
        "options": [
            { "key": "song", "label": "Song", "color_factor": 2 }
        ]
    },
    {
        "key": "song",
        "label": "Song",
        "is_audio": true,
        "audioSource": "song.mp3",
        "hasIcon": true
    },
    {
        "key": "settings_menu",
        "centerLabel": "Settings",
        "is_menu": true,
        "options": [ { "key": "brightness", "label": "Brightness" } ]
    },
    { "key": "brightness", "label": "Brightness" }
]"##;

/// Matching flow document: the editable subtree nested under
/// `settings_menu.main_menu`, one settings page next to it.
pub const SAMPLE_FLOW: &str = r#"{
    "settings_menu": {
        "main_menu": {
            "audio_menu": ["song"]
        },
        "brightness": []
    }
}"#;

/// Writes a document pair into a temp dir, returning the two file paths.
/// The `TempDir` must be kept alive for the duration of the test.
pub fn create_temp_documents(content: &str, flow: &str) -> (PathBuf, PathBuf, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let content_path = dir.path().join("menu_data.json");
    let flow_path = dir.path().join("menu_flow.json");
    fs::write(&content_path, content).expect("Failed to write content fixture");
    fs::write(&flow_path, flow).expect("Failed to write flow fixture");
    (content_path, flow_path, dir)
}

/// Writes the default sample pair into a temp dir.
pub fn create_sample_documents() -> (PathBuf, PathBuf, TempDir) {
    create_temp_documents(SAMPLE_CONTENT, SAMPLE_FLOW)
}
