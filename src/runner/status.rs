//! Run outcomes.

use thiserror::Error;

use crate::prerequisites::PrerequisiteFailure;
use crate::shell::Termination;

pub use crate::shell::INTERRUPTED_EXIT_CODE;

/// Why a run stopped without failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The user declined (or could not answer) the consent prompt.
    Declined,
    /// The user pressed Ctrl+C.
    Interrupted,
}

/// Why a run failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunFailure {
    /// The server has no preset under this keyword.
    #[error("Command preset \"{keyword}\" not found")]
    NotFound { keyword: String },

    /// Transport error, unexpected status, or unusable document.
    #[error("Could not fetch preset: {message}")]
    Fetch { message: String },

    /// A prerequisite install failed.
    #[error("Prerequisite failed: {0}")]
    Prerequisite(PrerequisiteFailure),

    /// A command exited unsuccessfully; later commands were not run.
    #[error("Command #{} failed ({termination}): {command}", .index + 1)]
    Command {
        index: usize,
        command: String,
        termination: Termination,
    },

    /// The command interpreter could not be started.
    #[error("Cannot run commands on this host: {message}")]
    Spawn { message: String },
}

impl RunFailure {
    /// The shell text involved, if the failure is tied to one.
    pub fn command(&self) -> Option<&str> {
        match self {
            RunFailure::Prerequisite(failure) => Some(&failure.prerequisite.install),
            RunFailure::Command { command, .. } => Some(command),
            _ => None,
        }
    }

    /// What the user can do about it.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            RunFailure::NotFound { .. } => Some("Check the keyword spelling or try another preset."),
            RunFailure::Fetch { .. } => Some("Check your connection or --api-url, then retry."),
            RunFailure::Prerequisite(_) => {
                Some("Install the prerequisite manually, then run the preset again.")
            }
            RunFailure::Command { .. } => {
                Some("Earlier commands already ran and were not rolled back.")
            }
            RunFailure::Spawn { .. } => Some("Make sure the system shell is installed."),
        }
    }
}

/// Outcome of a preset run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Every prerequisite resolved and every command exited 0.
    Success,
    /// Stopped on purpose; not an error.
    Aborted(AbortReason),
    /// Stopped by a failure.
    Failure(RunFailure),
}

impl RunStatus {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunStatus::Success | RunStatus::Aborted(AbortReason::Declined) => 0,
            RunStatus::Aborted(AbortReason::Interrupted) => INTERRUPTED_EXIT_CODE,
            RunStatus::Failure(_) => 1,
        }
    }

    /// Whether the run completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Success)
    }
}
