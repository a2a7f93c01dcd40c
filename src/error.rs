//! Error types for installer operations.
//!
//! This module defines [`InstallError`], the fatal error type returned by
//! every gating step, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Warnings never become an `InstallError`; they go to the UI and the log
//! - Every variant carries enough context for the user to fix the problem
//!   and re-run the installer
//! - Use `anyhow::Error` (via `InstallError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Fatal error that stops the installer.
#[derive(Debug, Error)]
pub enum InstallError {
    /// Running as root without `--force-root`.
    #[error("Refusing to run as root. If you really know what you are doing, re-run with --force-root")]
    ElevatedPrivileges,

    /// One or more required tools are not installed.
    #[error("The following packages must be installed before running this installer:\n{}", format_missing(.missing))]
    MissingDependencies { missing: Vec<String> },

    /// A required input file is not in the working directory.
    #[error("Required file not found: {path}")]
    ArtifactMissing { path: PathBuf },

    /// A required input file does not match any accepted checksum.
    #[error("Incorrect checksum for {path}: got {actual}")]
    ChecksumMismatch { path: PathBuf, actual: String },

    /// The patcher download failed.
    #[error("Failed to download {url}: {message}")]
    DownloadFailed { url: String, message: String },

    /// An external command failed at a gating step.
    #[error("Command failed with exit code {code}: {command}")]
    CommandFailed {
        command: String,
        code: i32,
        output: String,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A prompt was needed but cannot be answered in non-interactive mode.
    #[error("Cannot prompt for '{key}' in non-interactive mode (no default value)")]
    PromptUnavailable { key: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InstallError {
    /// Captured process output worth showing alongside the message, if any.
    pub fn diagnostic_output(&self) -> Option<(&str, &str)> {
        match self {
            Self::CommandFailed {
                command, output, ..
            } => Some((command.as_str(), output.as_str())),
            _ => None,
        }
    }
}

fn format_missing(missing: &[String]) -> String {
    missing
        .iter()
        .map(|m| format!("- {}", m))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, InstallError>;
