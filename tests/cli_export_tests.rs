//! End-to-end tests for `menuforge export` command.
#![allow(unused_variables)] // Temp dirs must be kept alive even if not directly accessed

use std::fs;
use std::process::Command;
use tempfile::TempDir;

mod fixtures;

use fixtures::*;

/// Path to the menuforge binary
fn menuforge_bin() -> &'static str {
    env!("CARGO_BIN_EXE_menuforge")
}

fn run_export(content: &std::path::Path, flow: &std::path::Path, extra: &[&str]) -> (TempDir, std::process::Output) {
    let out_dir = TempDir::new().expect("Failed to create output dir");
    let mut args = vec![
        "export".to_string(),
        "--content".to_string(),
        content.to_str().unwrap().to_string(),
        "--flow".to_string(),
        flow.to_str().unwrap().to_string(),
        "--output".to_string(),
        out_dir.path().to_str().unwrap().to_string(),
    ];
    args.extend(extra.iter().map(ToString::to_string));

    let output = Command::new(menuforge_bin())
        .args(&args)
        .output()
        .expect("Failed to execute command");
    (out_dir, output)
}

#[test]
fn test_export_writes_document_pair() {
    let (content_path, flow_path, temp) = create_sample_documents();
    let (out_dir, output) = run_export(&content_path, &flow_path, &[]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "Should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let data_path = out_dir.path().join("menu_data.json");
    let flow_out_path = out_dir.path().join("menu_flow.json");
    assert!(data_path.exists());
    assert!(flow_out_path.exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Exported"));

    // Flow round-trips structurally
    let exported_flow: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&flow_out_path).unwrap()).unwrap();
    let original_flow: serde_json::Value = serde_json::from_str(SAMPLE_FLOW).unwrap();
    assert_eq!(exported_flow, original_flow);
}

#[test]
fn test_export_normalizes_media_paths() {
    let (content_path, flow_path, temp) = create_sample_documents();
    let (out_dir, output) = run_export(
        &content_path,
        &flow_path,
        &["--device-root", "/home/pi/qtremote"],
    );
    assert_eq!(output.status.code(), Some(0));

    let data = fs::read_to_string(out_dir.path().join("menu_data.json")).unwrap();
    let records: serde_json::Value = serde_json::from_str(&data).unwrap();
    let song = records
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["key"] == "song")
        .expect("song record present");
    assert_eq!(song["audioSource"], "/home/pi/qtremote/music/song.mp3");
}

#[test]
fn test_export_preserves_unknown_fields_and_order() {
    let (content_path, flow_path, temp) = create_sample_documents();
    let (out_dir, output) = run_export(&content_path, &flow_path, &[]);
    assert_eq!(output.status.code(), Some(0));

    let data = fs::read_to_string(out_dir.path().join("menu_data.json")).unwrap();
    let records: serde_json::Value = serde_json::from_str(&data).unwrap();
    let song = records
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["key"] == "song")
        .expect("song record present");
    // Fields the editor does not model survive the round trip
    assert_eq!(song["hasIcon"], true);

    // Main records come first, settings records last
    let keys: Vec<&str> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["key"].as_str().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec!["main_menu", "audio_menu", "song", "settings_menu", "brightness"]
    );
}

#[test]
fn test_export_uses_four_space_indent() {
    let (content_path, flow_path, temp) = create_sample_documents();
    let (out_dir, output) = run_export(&content_path, &flow_path, &[]);
    assert_eq!(output.status.code(), Some(0));

    let flow = fs::read_to_string(out_dir.path().join("menu_flow.json")).unwrap();
    assert!(flow.lines().any(|line| line.starts_with("    \"")));
    assert!(!flow.lines().any(|line| line.starts_with("  \"")));
    assert!(flow.ends_with('\n'));

    let data = fs::read_to_string(out_dir.path().join("menu_data.json")).unwrap();
    assert!(data.lines().any(|line| line.starts_with("        \"key\"")));
    assert!(data.ends_with('\n'));
}

#[test]
fn test_export_missing_input_fails() {
    let out_dir = TempDir::new().unwrap();
    let output = Command::new(menuforge_bin())
        .args([
            "export",
            "--content",
            "/nonexistent/menu_data.json",
            "--flow",
            "/nonexistent/menu_flow.json",
            "--output",
            out_dir.path().to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(!out_dir.path().join("menu_data.json").exists());
}
