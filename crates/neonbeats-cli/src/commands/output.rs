//! Shared output helpers for `--json` and human modes.

use anyhow::{Context, Result};
use colored::Colorize;
use neonbeats_audio::AudioError;
use serde::Serialize;
use std::process::ExitCode;

/// Error codes for CLI-level failures. Library failures carry their own `NB_xxx` code.
pub mod error_codes {
    /// No history entry with the requested id
    pub const HISTORY_NOT_FOUND: &str = "CLI_001";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "NB_005")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl From<&AudioError> for JsonError {
    fn from(err: &AudioError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Serialize)]
struct FailureOutput {
    success: bool,
    error: JsonError,
}

/// Prints a pretty JSON document to stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON output")?;
    println!("{}", json);
    Ok(())
}

/// Reports a library failure and maps it to `exit_code`.
pub fn report_failure(json: bool, err: &AudioError, exit_code: u8) -> Result<ExitCode> {
    report_error(json, JsonError::from(err), exit_code)
}

/// Reports a coded error and maps it to `exit_code`.
pub fn report_error(json: bool, error: JsonError, exit_code: u8) -> Result<ExitCode> {
    if json {
        print_json(&FailureOutput {
            success: false,
            error,
        })?;
    } else {
        eprintln!(
            "{}: {} {}",
            "error".red(),
            error.message,
            format!("[{}]", error.code).dimmed()
        );
    }
    Ok(ExitCode::from(exit_code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_carries_code() {
        let err = AudioError::UnknownGenre("polka".to_string());
        let json = JsonError::from(&err);
        assert_eq!(json.code, err.code());
        assert!(json.message.contains("polka"));
    }

    #[test]
    fn test_report_failure_exit_code() {
        let err = AudioError::generation("boom");
        let code = report_failure(true, &err, 2).unwrap();
        assert_eq!(code, ExitCode::from(2));
    }
}
