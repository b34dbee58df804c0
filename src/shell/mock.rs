//! Recording process spawner for tests.
//!
//! `RecordingSpawner` implements [`ProcessSpawner`] without creating any
//! process. It records every invocation and plays back scripted
//! terminations keyed by command text; unscripted commands exit 0.
//! Clones share state, so a test can hand one clone to a
//! [`ShellInvoker`](super::ShellInvoker) and inspect the other.
//!
//! # Example
//!
//! ```
//! use thamil::shell::{Platform, RecordingSpawner, ShellContext, ShellInvoker, Termination};
//!
//! let spawner = RecordingSpawner::new();
//! spawner.respond("npm test", Termination::Exited(1));
//!
//! let invoker = ShellInvoker::with_spawner(
//!     ShellContext::new(Platform::Posix),
//!     Box::new(spawner.clone()),
//! );
//! assert!(!invoker.execute("npm test").unwrap().success());
//! assert_eq!(spawner.commands(), vec!["npm test"]);
//! ```

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::command::{
    CommandResult, Invocation, ProcessSpawner, RunLimits, StdioMode, Termination,
};

#[derive(Debug, Default)]
struct State {
    calls: Vec<(Invocation, StdioMode)>,
    terminations: HashMap<String, Termination>,
    stdout: HashMap<String, String>,
    fail_spawn: bool,
}

/// Spawner that records invocations instead of running them.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpawner {
    state: Arc<Mutex<State>>,
}

impl RecordingSpawner {
    /// Create a spawner where every command exits 0.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Script how a command ends.
    pub fn respond(&self, command: &str, termination: Termination) {
        self.state()
            .terminations
            .insert(command.to_string(), termination);
    }

    /// Script the stdout a command produces.
    pub fn respond_stdout(&self, command: &str, stdout: &str) {
        self.state()
            .stdout
            .insert(command.to_string(), stdout.to_string());
    }

    /// Make every spawn fail as if the interpreter were missing.
    pub fn fail_spawn(&self) {
        self.state().fail_spawn = true;
    }

    /// All recorded invocations, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.state().calls.iter().map(|(i, _)| i.clone()).collect()
    }

    /// Command texts of all recorded invocations, in order.
    pub fn commands(&self) -> Vec<String> {
        self.state()
            .calls
            .iter()
            .map(|(i, _)| i.command_text().to_string())
            .collect()
    }

    /// Stdio mode of each recorded invocation, in order.
    pub fn stdio_modes(&self) -> Vec<StdioMode> {
        self.state().calls.iter().map(|(_, m)| *m).collect()
    }

    /// Number of spawn attempts.
    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }
}

impl ProcessSpawner for RecordingSpawner {
    fn run(
        &self,
        invocation: &Invocation,
        stdio: StdioMode,
        _limits: &RunLimits,
    ) -> io::Result<CommandResult> {
        let mut state = self.state();
        state.calls.push((invocation.clone(), stdio));

        if state.fail_spawn {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            ));
        }

        let command = invocation.command_text();
        let termination = state
            .terminations
            .get(command)
            .copied()
            .unwrap_or(Termination::Exited(0));
        let stdout = match stdio {
            StdioMode::CaptureStdout => state.stdout.get(command).cloned().unwrap_or_default(),
            StdioMode::Inherit => String::new(),
        };

        Ok(CommandResult::new(termination, stdout, Duration::ZERO))
    }
}
