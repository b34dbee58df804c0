//! The run command.
//!
//! Loads settings, then builds the HTTP client, shell invoker and runner
//! for one preset run.

use std::path::PathBuf;

use tracing::debug;

use crate::client::HttpPresetClient;
use crate::config::{load_settings, Overrides};
use crate::environment::EnvironmentCheck;
use crate::error::Result;
use crate::runner::{PresetRunner, RunOptions, RunStatus};
use crate::shell::{InterruptFlag, ShellContext, ShellInvoker};
use crate::ui::UserInterface;

use super::args::Cli;

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use.
    pub exit_code: i32,
}

impl From<&RunStatus> for CommandResult {
    fn from(status: &RunStatus) -> Self {
        Self {
            success: status.is_success(),
            exit_code: status.exit_code(),
        }
    }
}

/// Runs one preset end to end.
pub struct RunCommand {
    keyword: String,
    config: Option<PathBuf>,
    overrides: Overrides,
    assume_yes: bool,
    dry_run: bool,
    interrupt: InterruptFlag,
}

impl RunCommand {
    /// Build the command from parsed arguments.
    ///
    /// `interrupt` is shared with the process's Ctrl+C handler.
    pub fn from_cli(cli: &Cli, interrupt: InterruptFlag) -> Self {
        Self {
            keyword: cli.keyword.clone(),
            config: cli.config.clone(),
            overrides: cli.overrides(),
            assume_yes: cli.yes,
            dry_run: cli.dry_run,
            interrupt,
        }
    }

    /// Execute the run.
    ///
    /// Setup problems (bad config, bad URL, no working directory) are
    /// errors; everything after that is reported through the returned
    /// [`CommandResult`].
    pub fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = load_settings(self.config.as_deref(), &self.overrides)?;
        let client = HttpPresetClient::with_timeout(&settings.api_url, settings.request_timeout())?;

        let mut ctx = ShellContext::from_host()?;
        ctx.timeout = settings.command_timeout();
        ctx.shell_program = settings.shell.clone();
        ctx.interrupt = self.interrupt.clone();
        let invoker = ShellInvoker::new(ctx);
        debug!(
            "Using {} {} for commands",
            invoker.form().program().display(),
            invoker.form().flag()
        );

        let options = RunOptions {
            check_policy: settings.check_policy,
            assume_yes: self.assume_yes,
            dry_run: self.dry_run,
        };

        let runner = PresetRunner::new(&client, &invoker, options)
            .with_environment(EnvironmentCheck::new(settings.min_available_memory_mb));

        let status = runner.run(&self.keyword, ui);
        Ok(CommandResult::from(&status))
    }
}
