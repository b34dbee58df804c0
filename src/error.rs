//! Error types for thamil operations.
//!
//! This module defines [`ThamilError`], the error type used by the
//! library layers (config, fetch, shell), and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - Use `ThamilError` for failures that need distinct handling
//! - Use `anyhow::Error` (via `ThamilError::Other`) for unexpected errors
//! - Outcomes of a preset run are reported through
//!   [`RunStatus`](crate::runner::RunStatus), not through this type

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for thamil operations.
#[derive(Debug, Error)]
pub enum ThamilError {
    /// The server has no preset stored under this keyword.
    #[error("Command preset \"{keyword}\" not found")]
    PresetNotFound { keyword: String },

    /// Transport failure or unexpected HTTP status while fetching.
    #[error("Failed to fetch {url}: {message}")]
    FetchFailed { url: String, message: String },

    /// The fetched document is not a usable preset.
    #[error("Invalid preset: {message}")]
    InvalidPreset { message: String },

    /// The command interpreter could not be started at all.
    #[error("Could not start '{program}': {message}")]
    SpawnFailed { program: String, message: String },

    /// Explicitly requested config file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThamilError {
    /// Whether this is a read cut short by Ctrl+C (raw-mode prompts).
    pub fn is_interrupted(&self) -> bool {
        matches!(self, ThamilError::Io(e) if e.kind() == std::io::ErrorKind::Interrupted)
    }
}

/// Result type alias for thamil operations.
pub type Result<T> = std::result::Result<T, ThamilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_not_found_displays_keyword() {
        let err = ThamilError::PresetNotFound {
            keyword: "setup-node".into(),
        };
        assert_eq!(err.to_string(), "Command preset \"setup-node\" not found");
    }

    #[test]
    fn fetch_failed_displays_url_and_message() {
        let err = ThamilError::FetchFailed {
            url: "http://localhost/commands/x".into(),
            message: "HTTP 500".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("http://localhost/commands/x"));
        assert!(msg.contains("HTTP 500"));
    }

    #[test]
    fn spawn_failed_displays_program() {
        let err = ThamilError::SpawnFailed {
            program: "/bin/sh".into(),
            message: "No such file or directory".into(),
        };
        assert!(err.to_string().contains("/bin/sh"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = ThamilError::ConfigParseError {
            path: PathBuf::from("/home/me/.thamil/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ThamilError = io_err.into();
        assert!(matches!(err, ThamilError::Io(_)));
    }

    #[test]
    fn interrupted_read_is_recognized() {
        let err: ThamilError =
            std::io::Error::new(std::io::ErrorKind::Interrupted, "read interrupted").into();
        assert!(err.is_interrupted());

        let err: ThamilError =
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "closed").into();
        assert!(!err.is_interrupted());
    }
}
