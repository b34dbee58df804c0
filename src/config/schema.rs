//! Settings schema.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThamilError};
use crate::prerequisites::CheckPolicy;

/// Where presets are fetched from unless configured otherwise.
pub const DEFAULT_API_URL: &str = "https://thamil-cli-tool.onrender.com";

/// Resolved settings for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Base URL of the preset service.
    pub api_url: String,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Kill any single command that runs longer than this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_timeout_secs: Option<u64>,

    /// How prerequisite checks are judged.
    pub check_policy: CheckPolicy,

    /// Warn when less memory than this is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_available_memory_mb: Option<u64>,

    /// Interpreter binary to use instead of `/bin/sh` or `cmd.exe`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 30,
            command_timeout_secs: None,
            check_policy: CheckPolicy::default(),
            min_available_memory_mb: Some(512),
            shell: None,
        }
    }
}

impl Settings {
    /// Apply environment/flag overrides on top of these settings.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(url) = &overrides.api_url {
            self.api_url = url.clone();
        }
        if let Some(secs) = overrides.command_timeout_secs {
            self.command_timeout_secs = Some(secs);
        }
        if overrides.strict_checks {
            self.check_policy = CheckPolicy::Strict;
        }
    }

    /// Reject values no run could use.
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(invalid("api_url must not be empty"));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs must be greater than 0"));
        }
        if self.command_timeout_secs == Some(0) {
            return Err(invalid("command_timeout_secs must be greater than 0"));
        }
        Ok(())
    }

    /// HTTP request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Per-command timeout, if any.
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }
}

fn invalid(message: &str) -> ThamilError {
    ThamilError::InvalidConfig {
        message: message.to_string(),
    }
}

/// Values from the environment and command line.
///
/// `None`/`false` leaves the file or default value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `--api-url` / `THAMIL_API_URL`.
    pub api_url: Option<String>,
    /// `--command-timeout` / `THAMIL_COMMAND_TIMEOUT`.
    pub command_timeout_secs: Option<u64>,
    /// `--strict-checks` / `THAMIL_STRICT_CHECKS`.
    pub strict_checks: bool,
}
