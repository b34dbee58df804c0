//! The preset runner.
//!
//! One run, in order, each step a possible early exit:
//!
//! 1. environment check (warnings only)
//! 2. fetch the preset
//! 3. show the plan and ask for consent
//! 4. resolve prerequisites
//! 5. run the commands, stopping at the first failure
//!
//! Nothing is rolled back: installs and commands that already succeeded
//! stay applied when a later step fails.

use tracing::{debug, info, warn};

use crate::client::PresetSource;
use crate::environment::EnvironmentCheck;
use crate::error::ThamilError;
use crate::prerequisites::{CheckPolicy, FailureReason, PrerequisiteResolver};
use crate::preset::Preset;
use crate::shell::{ShellInvoker, Termination};
use crate::ui::UserInterface;

use super::consent::{Consent, ConsentGate};
use super::status::{AbortReason, RunFailure, RunStatus};

/// Options controlling a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// How prerequisite checks are judged.
    pub check_policy: CheckPolicy,
    /// Grant consent without prompting.
    pub assume_yes: bool,
    /// Fetch and show the plan, but run nothing.
    pub dry_run: bool,
}

/// Drives a single preset run.
pub struct PresetRunner<'a> {
    source: &'a dyn PresetSource,
    invoker: &'a ShellInvoker,
    environment: EnvironmentCheck,
    options: RunOptions,
}

impl<'a> PresetRunner<'a> {
    /// Create a runner with no environment check.
    pub fn new(
        source: &'a dyn PresetSource,
        invoker: &'a ShellInvoker,
        options: RunOptions,
    ) -> Self {
        Self {
            source,
            invoker,
            environment: EnvironmentCheck::disabled(),
            options,
        }
    }

    /// Check host resources before fetching.
    pub fn with_environment(mut self, environment: EnvironmentCheck) -> Self {
        self.environment = environment;
        self
    }

    /// Run the preset stored under `keyword`, reporting as it goes.
    pub fn run(&self, keyword: &str, ui: &mut dyn UserInterface) -> RunStatus {
        let status = self.run_phases(keyword, ui);
        self.report(&status, ui);
        status
    }

    fn run_phases(&self, keyword: &str, ui: &mut dyn UserInterface) -> RunStatus {
        for warning in self.environment.warnings() {
            warn!("{}", warning);
            ui.warning(&warning);
        }

        let preset = match self.fetch(keyword, ui) {
            Ok(preset) => preset,
            Err(failure) => return RunStatus::Failure(failure),
        };

        if self.interrupted() {
            return RunStatus::Aborted(AbortReason::Interrupted);
        }

        let gate = ConsentGate::new(self.options.assume_yes);

        if self.options.dry_run {
            gate.present(ui, &preset);
            ui.message("Dry run: nothing was executed.");
            return RunStatus::Success;
        }

        match gate.confirm(ui, &preset) {
            Consent::Granted => {}
            Consent::Interrupted => {
                self.invoker.context().interrupt.raise();
                return RunStatus::Aborted(AbortReason::Interrupted);
            }
            Consent::Declined if self.interrupted() => {
                return RunStatus::Aborted(AbortReason::Interrupted);
            }
            Consent::Declined => {
                info!("Run of '{}' declined", keyword);
                return RunStatus::Aborted(AbortReason::Declined);
            }
        }

        if let Err(status) = self.resolve_prerequisites(&preset, ui) {
            return status;
        }

        if let Err(status) = self.run_commands(&preset, ui) {
            return status;
        }

        RunStatus::Success
    }

    fn fetch(&self, keyword: &str, ui: &mut dyn UserInterface) -> Result<Preset, RunFailure> {
        let mut spinner = ui.start_spinner(&format!(
            "Fetching command preset from: {}",
            self.source.location(keyword)
        ));

        match self.source.fetch(keyword) {
            Ok(preset) => {
                spinner.finish_success(&format!(
                    "Received \"{}\": {} prerequisite(s), {} command(s)",
                    preset.keyword,
                    preset.prerequisites.len(),
                    preset.commands.len()
                ));
                debug!("Fetched preset: {:?}", preset);
                Ok(preset)
            }
            Err(ThamilError::PresetNotFound { keyword }) => {
                spinner.finish_error("Not found");
                Err(RunFailure::NotFound { keyword })
            }
            Err(e) => {
                spinner.finish_error("Fetch failed");
                Err(RunFailure::Fetch {
                    message: e.to_string(),
                })
            }
        }
    }

    fn resolve_prerequisites(
        &self,
        preset: &Preset,
        ui: &mut dyn UserInterface,
    ) -> Result<(), RunStatus> {
        if preset.prerequisites.is_empty() {
            return Ok(());
        }

        let resolver = PrerequisiteResolver::new(self.invoker, self.options.check_policy);
        match resolver.resolve(&preset.prerequisites, ui) {
            Ok(report) => {
                info!(
                    "Prerequisites resolved: {} of {} present, {} installed",
                    report.already_present,
                    report.total(),
                    report.installed
                );
                Ok(())
            }
            Err(failure) => Err(match failure.reason.clone() {
                FailureReason::Interrupted => RunStatus::Aborted(AbortReason::Interrupted),
                FailureReason::Spawn(message) => RunStatus::Failure(RunFailure::Spawn { message }),
                FailureReason::InstallFailed(_) => {
                    RunStatus::Failure(RunFailure::Prerequisite(failure))
                }
            }),
        }
    }

    fn run_commands(&self, preset: &Preset, ui: &mut dyn UserInterface) -> Result<(), RunStatus> {
        preset
            .commands
            .iter()
            .enumerate()
            .try_for_each(|(index, command)| {
                ui.message(&format!("\nRunning: {}", command));

                let result = self.invoker.execute(command).map_err(|e| {
                    RunStatus::Failure(RunFailure::Spawn {
                        message: e.to_string(),
                    })
                })?;

                match result.termination {
                    Termination::Exited(0) => Ok(()),
                    Termination::Interrupted => Err(RunStatus::Aborted(AbortReason::Interrupted)),
                    termination => Err(RunStatus::Failure(RunFailure::Command {
                        index,
                        command: command.clone(),
                        termination,
                    })),
                }
            })
    }

    fn interrupted(&self) -> bool {
        self.invoker.context().interrupt.is_raised()
    }

    fn report(&self, status: &RunStatus, ui: &mut dyn UserInterface) {
        match status {
            RunStatus::Success if self.options.dry_run => {}
            RunStatus::Success => ui.success("All commands executed successfully!"),
            RunStatus::Aborted(AbortReason::Declined) => {
                ui.message("Aborted. Nothing was run.");
            }
            RunStatus::Aborted(AbortReason::Interrupted) => {
                ui.warning("Interrupted. Stopping without running anything further.");
            }
            RunStatus::Failure(failure) => {
                ui.error(&failure.to_string());
                if let Some(command) = failure.command() {
                    ui.show_error_block(command, failure.hint());
                } else if let Some(hint) = failure.hint() {
                    ui.message(&format!("Hint: {}", hint));
                }
            }
        }
    }
}
