//! Validation command for a menu document pair.

use crate::cli::common::{CliError, CliResult, ValidationMessage, ValidationResponse};
use crate::models::{is_hex_color, FlowNode, MenuItem};
use crate::parser;
use clap::Args;
use std::collections::HashSet;
use std::path::PathBuf;

/// Validate a content/flow document pair for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to the content catalog (menu_data.json)
    #[arg(short, long, value_name = "FILE")]
    pub content: PathBuf,

    /// Path to the flow document (menu_flow.json)
    #[arg(short, long, value_name = "FILE")]
    pub flow: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let content = parser::load_menu_data(&self.content)
            .map_err(|e| CliError::io(format!("Failed to load content: {e:#}")))?;
        let flow = parser::load_menu_flow(&self.flow)
            .map_err(|e| CliError::io(format!("Failed to load flow: {e:#}")))?;

        let messages = collect_findings(&content, &flow);

        let has_errors = messages.iter().any(|m| m.severity == "error");
        let has_warnings = messages.iter().any(|m| m.severity == "warning");
        let valid = !has_errors && !(self.strict && has_warnings);

        let response = ValidationResponse { valid, messages };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            for message in &response.messages {
                println!("{}: {}", message.severity, message.message);
            }
            if response.valid {
                println!("Documents are valid.");
            }
        }

        if response.valid {
            Ok(())
        } else {
            Err(CliError::validation(format!(
                "Validation failed with {} finding(s)",
                response.messages.len()
            )))
        }
    }
}

/// Runs all checks over a raw (unpartitioned) document pair.
///
/// Hard errors are violations the editor itself refuses to create: empty or
/// duplicate keys, conflicting type flags, media flags without a source.
/// Content/flow divergence is reported as warnings only; the engine tolerates
/// it at runtime and an edit session may pass through it transiently.
pub fn collect_findings(content: &[MenuItem], flow: &FlowNode) -> Vec<ValidationMessage> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let mut seen: HashSet<&str> = HashSet::new();
    for item in content {
        if item.key.is_empty() {
            errors.push(error("Content record with an empty key", None));
            continue;
        }
        if !seen.insert(&item.key) {
            errors.push(error(
                format!("Duplicate content key '{}'", item.key),
                Some(&item.key),
            ));
        }
        if item.has_conflicting_flags() {
            errors.push(error(
                format!("Record '{}' sets more than one type flag", item.key),
                Some(&item.key),
            ));
        }
        if item.is_video && item.video_source.is_none() {
            errors.push(error(
                format!("Video record '{}' has no videoSource", item.key),
                Some(&item.key),
            ));
        }
        if item.is_audio && item.audio_source.is_none() {
            errors.push(error(
                format!("Audio record '{}' has no audioSource", item.key),
                Some(&item.key),
            ));
        }
        if item.is_lottie && item.lottie_source.is_none() {
            errors.push(error(
                format!("Lottie record '{}' has no lottieSource", item.key),
                Some(&item.key),
            ));
        }
        if let Some(color) = item.color.as_deref() {
            if !color.is_empty() && !is_hex_color(color) {
                warnings.push(warning(
                    format!("Record '{}' has a non-hex color '{color}'", item.key),
                    Some(&item.key),
                ));
            }
        }
    }

    let content_keys: HashSet<&str> = content.iter().map(|item| item.key.as_str()).collect();
    let flow_keys = flow.all_keys();

    for key in &flow_keys {
        if !content_keys.contains(key.as_str()) {
            warnings.push(warning(
                format!("Flow references '{key}' with no content record"),
                Some(key),
            ));
        }
    }

    for item in content {
        if !item.key.is_empty() && !flow_keys.contains(&item.key) {
            warnings.push(warning(
                format!("Content record '{}' is unreachable from the flow", item.key),
                Some(&item.key),
            ));
        }
        for option in item.options.as_deref().unwrap_or_default() {
            if !content_keys.contains(option.key.as_str()) {
                warnings.push(warning(
                    format!(
                        "Menu '{}' lists option '{}' with no content record",
                        item.key, option.key
                    ),
                    Some(&item.key),
                ));
            }
        }
    }

    errors.extend(warnings);
    errors
}

fn error(message: impl Into<String>, key: Option<&str>) -> ValidationMessage {
    ValidationMessage {
        severity: "error".to_string(),
        message: message.into(),
        key: key.map(ToString::to_string),
    }
}

fn warning(message: impl Into<String>, key: Option<&str>) -> ValidationMessage {
    ValidationMessage {
        severity: "warning".to_string(),
        message: message.into(),
        key: key.map(ToString::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;

    fn flow(json: &str) -> FlowNode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_clean_documents_have_no_findings() {
        let mut menu = MenuItem::stub("m");
        menu.set_item_type(ItemType::Menu);
        let leaf = MenuItem::stub("leaf");
        let findings = collect_findings(&[menu, leaf], &flow(r#"{"m": ["leaf"]}"#));
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn test_duplicate_and_empty_keys_are_errors() {
        let items = vec![MenuItem::stub("a"), MenuItem::stub("a"), MenuItem::stub("")];
        let findings = collect_findings(&items, &flow(r#"{"a": []}"#));
        let errors: Vec<_> = findings.iter().filter(|m| m.severity == "error").collect();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_divergence_is_warning_only() {
        let findings = collect_findings(&[MenuItem::stub("orphan")], &flow(r#"{"ghost": []}"#));
        assert!(findings.iter().all(|m| m.severity == "warning"));
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn test_media_flag_without_source_is_error() {
        let mut item = MenuItem::stub("clip");
        item.is_video = true;
        let findings = collect_findings(&[item], &flow(r#"{"m": ["clip"]}"#));
        assert!(findings
            .iter()
            .any(|m| m.severity == "error" && m.message.contains("videoSource")));
    }
}
