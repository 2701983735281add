//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from clusterlint-core
    #[error("{0}")]
    Core(#[from] clusterlint_core::Error),

    /// One or more manifests had violations
    #[error("{count} violation(s) found in {files} file(s)")]
    ValidationFailed { count: usize, files: usize },

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Machine types missing from the catalog
    #[error("Unknown machine type(s): {}", names.join(", "))]
    UnknownMachineTypes { names: Vec<String> },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::ValidationFailed { .. } => 2,
            Self::FileNotFound { .. } => 3,
            Self::Core(_) => 4,
            Self::Config(_) => 5,
            Self::UnknownMachineTypes { .. } => 6,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Toml(_) => 14,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    let mut message = error.to_string();

    // Core catalog errors carry their cause separately
    if let Error::Core(core @ clusterlint_core::Error::Catalog { .. }) = error {
        let mut source = std::error::Error::source(core);
        while let Some(cause) = source {
            message.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
    }

    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), message)
    } else {
        format!("Error: {}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failure_exit_code() {
        let err = Error::ValidationFailed { count: 3, files: 1 };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "3 violation(s) found in 1 file(s)");
    }

    #[test]
    fn test_exit_codes_are_distinct_from_success() {
        let errors = [
            Error::other("x"),
            Error::config("bad"),
            Error::FileNotFound { path: PathBuf::from("a.yaml") },
            Error::UnknownMachineTypes { names: vec!["z9.huge".to_string()] },
            Error::Core(clusterlint_core::Error::manifest("empty", None)),
        ];
        for err in &errors {
            assert_ne!(err.exit_code(), 0);
            assert_ne!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_format_error_plain() {
        let err = Error::UnknownMachineTypes {
            names: vec!["a.b".to_string(), "c.d".to_string()],
        };
        assert_eq!(format_error(&err, false), "Error: Unknown machine type(s): a.b, c.d");
    }
}
