//! Preset documents.
//!
//! A [`Preset`] is the read-only execution plan fetched from the server:
//! an ordered list of [`Prerequisite`] check/install pairs followed by an
//! ordered list of shell commands. Parsing fails closed: a document
//! without `commands`, or with a malformed prerequisite, is rejected
//! instead of being run with holes in it.
//!
//! # Example
//!
//! ```
//! use thamil::preset::Preset;
//!
//! let preset = Preset::from_json(
//!     r#"{"keyword": "setup-node", "commands": ["echo A", "echo B"], "prerequisites": []}"#,
//!     "setup-node",
//! )
//! .unwrap();
//! assert_eq!(preset.commands, vec!["echo A", "echo B"]);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThamilError};

/// One environmental dependency: a probe and its remediation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prerequisite {
    /// Shell command whose success means the dependency is present.
    pub check: String,
    /// Shell command run only when `check` fails.
    pub install: String,
}

impl Prerequisite {
    /// Create a prerequisite from a check and install command.
    pub fn new(check: impl Into<String>, install: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            install: install.into(),
        }
    }
}

/// A named plan of prerequisites and commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Lookup key on the server.
    #[serde(default)]
    pub keyword: String,

    /// Commands, executed in order.
    pub commands: Vec<String>,

    /// Prerequisites, resolved in order before any command runs.
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
}

impl Preset {
    /// Parse and validate a preset document.
    ///
    /// `requested` fills in the keyword when the server omits it.
    /// Unknown fields such as the store's `_id` and `__v` are ignored.
    pub fn from_json(body: &str, requested: &str) -> Result<Self> {
        let mut preset: Preset =
            serde_json::from_str(body).map_err(|e| ThamilError::InvalidPreset {
                message: e.to_string(),
            })?;

        if preset.keyword.trim().is_empty() {
            preset.keyword = requested.to_string();
        }

        preset.validate()?;
        Ok(preset)
    }

    /// Reject blank commands and half-specified prerequisites.
    pub fn validate(&self) -> Result<()> {
        if let Some(index) = self.commands.iter().position(|c| c.trim().is_empty()) {
            return Err(ThamilError::InvalidPreset {
                message: format!("command #{} is blank", index + 1),
            });
        }

        for (index, prerequisite) in self.prerequisites.iter().enumerate() {
            if prerequisite.check.trim().is_empty() {
                return Err(ThamilError::InvalidPreset {
                    message: format!("prerequisite #{} has a blank check", index + 1),
                });
            }
            if prerequisite.install.trim().is_empty() {
                return Err(ThamilError::InvalidPreset {
                    message: format!("prerequisite #{} has a blank install", index + 1),
                });
            }
        }

        Ok(())
    }

    /// Human-readable plan, one line per action, for the consent prompt.
    pub fn plan_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if !self.prerequisites.is_empty() {
            lines.push("Prerequisites:".to_string());
            for (i, p) in self.prerequisites.iter().enumerate() {
                lines.push(format!("  {}. check:   {}", i + 1, p.check));
                lines.push(format!("     install: {}", p.install));
            }
        }

        if self.commands.is_empty() {
            lines.push("Commands: (none)".to_string());
        } else {
            lines.push("Commands:".to_string());
            for (i, c) in self.commands.iter().enumerate() {
                lines.push(format!("  {}. {}", i + 1, c));
            }
        }

        lines
    }
}
