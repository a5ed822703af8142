//! Reading and writing of the menu document pair.
//!
//! The content catalog (`menu_data.json`) is a JSON array of records; the
//! flow document (`menu_flow.json`) is a JSON object of nested mappings and
//! sequences. Both are read tolerantly (unknown fields pass through) and
//! written with 4-space indentation, matching what the kiosk runtime ships
//! with.

use crate::models::{FlowNode, MenuItem};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Loads a content catalog from a JSON array file.
///
/// # Errors
///
/// Returns errors for a missing or unreadable file and for JSON that is not
/// an array of content records.
pub fn load_menu_data(path: &Path) -> Result<Vec<MenuItem>> {
    if !path.is_file() {
        anyhow::bail!(
            "Content file not found: {}\n\n\
             Please provide a path to the exported menu_data.json.",
            path.display()
        );
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read content file: {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse content file: {}", path.display()))
}

/// Loads a flow document from a JSON object file.
///
/// # Errors
///
/// Returns errors for a missing or unreadable file and for JSON whose root is
/// not an object (a flow document is always a mapping at the top level).
pub fn load_menu_flow(path: &Path) -> Result<FlowNode> {
    if !path.is_file() {
        anyhow::bail!(
            "Flow file not found: {}\n\n\
             Please provide a path to the exported menu_flow.json.",
            path.display()
        );
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read flow file: {}", path.display()))?;

    let flow: FlowNode = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse flow file: {}", path.display()))?;

    if !flow.is_branch() {
        anyhow::bail!(
            "Flow file root must be an object, got an array: {}",
            path.display()
        );
    }

    Ok(flow)
}

/// Writes a content catalog with 4-space indentation.
///
/// # Errors
///
/// Returns errors when the file cannot be written.
pub fn save_menu_data(path: &Path, content: &[MenuItem]) -> Result<()> {
    write_pretty(path, &content)
        .with_context(|| format!("Failed to write content file: {}", path.display()))
}

/// Writes a flow document with 4-space indentation.
///
/// # Errors
///
/// Returns errors when the file cannot be written.
pub fn save_menu_flow(path: &Path, flow: &FlowNode) -> Result<()> {
    write_pretty(path, flow)
        .with_context(|| format!("Failed to write flow file: {}", path.display()))
}

/// Serializes with a 4-space pretty formatter and writes atomically via a
/// sibling temp file, so a crash mid-write never truncates an export.
fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &buffer)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_preserves_order_and_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("menu_data.json");
        let flow_path = dir.path().join("menu_flow.json");

        std::fs::write(
            &data_path,
            r#"[{"key": "welcome", "is_menu": true, "hasIcon": true, "options": []}]"#,
        )
        .unwrap();
        std::fs::write(&flow_path, r#"{"b": {"z": ["c", "a"]}, "a": []}"#).unwrap();

        let content = load_menu_data(&data_path).unwrap();
        let flow = load_menu_flow(&flow_path).unwrap();

        save_menu_data(&data_path, &content).unwrap();
        save_menu_flow(&flow_path, &flow).unwrap();

        let data_out = std::fs::read_to_string(&data_path).unwrap();
        assert!(data_out.contains("\"hasIcon\": true"), "got {data_out}");

        let flow_out = std::fs::read_to_string(&flow_path).unwrap();
        let b = flow_out.find("\"b\"").unwrap();
        let a = flow_out.rfind("\"a\"").unwrap();
        assert!(b < a, "top-level key order must survive: {flow_out}");
        assert!(flow_out.contains("    \"b\""), "expected 4-space indent: {flow_out}");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_menu_data(Path::new("/nonexistent/menu_data.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/menu_data.json"));
    }

    #[test]
    fn test_flow_root_must_be_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("menu_flow.json");
        std::fs::write(&path, r#"["not", "a", "mapping"]"#).unwrap();
        assert!(load_menu_flow(&path).is_err());
    }
}
