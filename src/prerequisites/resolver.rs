//! The check/install loop.

use std::fmt;

use tracing::{debug, info};

use crate::error::ThamilError;
use crate::preset::Prerequisite;
use crate::shell::{ShellInvoker, Termination};
use crate::ui::UserInterface;

use super::CheckPolicy;

/// Why resolution stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The install command ran and did not exit 0.
    InstallFailed(Termination),
    /// The interpreter could not be started.
    Spawn(String),
    /// The user interrupted the run.
    Interrupted,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::InstallFailed(termination) => {
                write!(f, "install failed ({})", termination)
            }
            FailureReason::Spawn(message) => write!(f, "{}", message),
            FailureReason::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// The prerequisite resolution stopped at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteFailure {
    /// Zero-based position in the preset's list.
    pub index: usize,
    /// The prerequisite itself.
    pub prerequisite: Prerequisite,
    /// What went wrong.
    pub reason: FailureReason,
}

impl fmt::Display for PrerequisiteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "prerequisite #{} ({}): {}",
            self.index + 1,
            self.prerequisite.install,
            self.reason
        )
    }
}

impl std::error::Error for PrerequisiteFailure {}

/// Counts from a successful resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Prerequisites whose check passed outright.
    pub already_present: usize,
    /// Prerequisites that needed their install command.
    pub installed: usize,
}

impl ResolveReport {
    /// Total prerequisites handled.
    pub fn total(&self) -> usize {
        self.already_present + self.installed
    }
}

/// Resolves prerequisites one at a time through a [`ShellInvoker`].
pub struct PrerequisiteResolver<'a> {
    invoker: &'a ShellInvoker,
    policy: CheckPolicy,
}

impl<'a> PrerequisiteResolver<'a> {
    /// Create a resolver.
    pub fn new(invoker: &'a ShellInvoker, policy: CheckPolicy) -> Self {
        Self { invoker, policy }
    }

    /// Resolve the whole list in order, stopping at the first failure.
    ///
    /// Prerequisites installed before a failure stay installed.
    pub fn resolve(
        &self,
        prerequisites: &[Prerequisite],
        ui: &mut dyn UserInterface,
    ) -> Result<ResolveReport, PrerequisiteFailure> {
        prerequisites.iter().enumerate().try_fold(
            ResolveReport::default(),
            |mut report, (index, prerequisite)| {
                let fail = |reason| PrerequisiteFailure {
                    index,
                    prerequisite: prerequisite.clone(),
                    reason,
                };

                if self.check(prerequisite, ui).map_err(fail)? {
                    ui.success(&format!("Prerequisite check passed: {}", prerequisite.check));
                    report.already_present += 1;
                    return Ok(report);
                }

                ui.message(&format!("Installing prerequisite: {}", prerequisite.install));
                self.install(prerequisite).map_err(fail)?;
                report.installed += 1;
                Ok(report)
            },
        )
    }

    /// Run the check quietly. `Ok(false)` means "needs install".
    fn check(
        &self,
        prerequisite: &Prerequisite,
        ui: &mut dyn UserInterface,
    ) -> Result<bool, FailureReason> {
        let result = self
            .invoker
            .probe(&prerequisite.check)
            .map_err(spawn_reason)?;

        if result.termination == Termination::Interrupted {
            return Err(FailureReason::Interrupted);
        }

        let output = result.stdout.trim();
        if !output.is_empty() {
            ui.detail(&format!("  {} -> {}", prerequisite.check, output));
        }

        let satisfied = self.policy.is_satisfied(&result);
        debug!(
            "Check '{}' -> {} (satisfied: {})",
            prerequisite.check, result.termination, satisfied
        );
        Ok(satisfied)
    }

    /// Run the install with the terminal attached.
    fn install(&self, prerequisite: &Prerequisite) -> Result<(), FailureReason> {
        let result = self
            .invoker
            .execute(&prerequisite.install)
            .map_err(spawn_reason)?;

        match result.termination {
            Termination::Exited(0) => {
                info!("Installed prerequisite via '{}'", prerequisite.install);
                Ok(())
            }
            Termination::Interrupted => Err(FailureReason::Interrupted),
            other => Err(FailureReason::InstallFailed(other)),
        }
    }
}

fn spawn_reason(err: ThamilError) -> FailureReason {
    FailureReason::Spawn(err.to_string())
}
