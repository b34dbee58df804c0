//! Check success policies.

use serde::{Deserialize, Serialize};

use crate::shell::CommandResult;

/// When a prerequisite's `check` command counts as passing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckPolicy {
    /// Exit status 0 is enough.
    #[default]
    ExitStatus,
    /// Exit status 0 and some non-whitespace output on stdout.
    Strict,
}

impl CheckPolicy {
    /// Judge a finished check command.
    pub fn is_satisfied(&self, result: &CommandResult) -> bool {
        match self {
            CheckPolicy::ExitStatus => result.success(),
            CheckPolicy::Strict => result.success() && !result.stdout.trim().is_empty(),
        }
    }
}
