//! Shared CLI infrastructure: error types, exit codes, and the JSON
//! validation report shape.

use serde::Serialize;
use std::fmt;

/// Result type for CLI command execution.
pub type CliResult<T> = Result<T, CliError>;

/// Process exit codes for scriptable use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command completed successfully.
    Success = 0,
    /// I/O or runtime failure.
    Error = 1,
    /// The documents failed validation.
    ValidationFailed = 2,
}

impl ExitCode {
    /// The raw process exit code.
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// A CLI command error carrying its exit code.
#[derive(Debug)]
pub struct CliError {
    message: String,
    exit_code: ExitCode,
}

impl CliError {
    /// An I/O or runtime error (exit code 1).
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::Error,
        }
    }

    /// A validation failure (exit code 2).
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::ValidationFailed,
        }
    }

    /// The exit code this error maps to.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// One finding in a validation report.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationMessage {
    /// `"error"` or `"warning"`.
    pub severity: String,
    /// Human-readable description.
    pub message: String,
    /// Key of the record the finding is about, when attributable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// JSON shape of the `validate` command output.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    /// True when no errors were found (warnings do not affect this unless
    /// `--strict` was given).
    pub valid: bool,
    /// All findings, errors first.
    pub messages: Vec<ValidationMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(CliError::io("x").exit_code().code(), 1);
        assert_eq!(CliError::validation("x").exit_code().code(), 2);
    }
}
