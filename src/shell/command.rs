//! Shell command execution.
//!
//! [`ShellInvoker`] runs a command string through the host interpreter
//! chosen once from [`ShellContext::platform`]. The actual process
//! creation sits behind [`ProcessSpawner`] so tests can inspect the
//! constructed [`Invocation`] without spawning anything.
//!
//! A non-zero exit is data ([`Termination`]), not an error. Only a failure
//! to start the interpreter surfaces as [`ThamilError::SpawnFailed`].

use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{Result, ThamilError};

use super::interrupt::InterruptFlag;
use super::platform::{Platform, ShellForm};

const WAIT_POLL: Duration = Duration::from_millis(50);

/// Fully constructed process launch: program, arguments, working dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Interpreter binary.
    pub program: PathBuf,
    /// Arguments, ending with the command text.
    pub args: Vec<String>,
    /// Working directory (inherits the caller's when `None`).
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    /// The command text handed to the interpreter.
    pub fn command_text(&self) -> &str {
        self.args.last().map(String::as_str).unwrap_or("")
    }
}

/// What happens to the child's standard streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// Child shares the terminal (installs, main commands).
    Inherit,
    /// Stdout is captured, stdin and stderr are discarded (checks).
    CaptureStdout,
}

/// How a subprocess ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Normal exit with a status code.
    Exited(i32),
    /// Killed by a signal (Unix).
    Signaled(i32),
    /// Killed by thamil after the configured timeout.
    TimedOut,
    /// The user interrupted the run while this process was active.
    Interrupted,
}

impl Termination {
    /// Map a std exit status.
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Termination::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Termination::Signaled(signal);
            }
        }

        Termination::Exited(-1)
    }

    /// Whether this is exit status zero.
    pub fn success(&self) -> bool {
        matches!(self, Termination::Exited(0))
    }

    /// Whether the child died from the terminal interrupt itself.
    fn is_interrupt(&self) -> bool {
        match self {
            #[cfg(unix)]
            Termination::Signaled(signal) => *signal == libc::SIGINT,
            // STATUS_CONTROL_C_EXIT
            #[cfg(windows)]
            Termination::Exited(code) => *code == 0xC000013Au32 as i32,
            _ => false,
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Exited(code) => write!(f, "exit code {}", code),
            Termination::Signaled(signal) => write!(f, "killed by signal {}", signal),
            Termination::TimedOut => write!(f, "timed out"),
            Termination::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// How the process ended.
    pub termination: Termination,

    /// Captured stdout (empty when streams were inherited).
    pub stdout: String,

    /// Execution duration.
    pub duration: Duration,
}

impl CommandResult {
    /// Create a result.
    pub fn new(termination: Termination, stdout: String, duration: Duration) -> Self {
        Self {
            termination,
            stdout,
            duration,
        }
    }

    /// Whether command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.termination.success()
    }
}

/// Bounds on a running subprocess.
#[derive(Debug, Clone, Default)]
pub struct RunLimits {
    /// Kill the process once it has run this long.
    pub timeout: Option<Duration>,
    /// Interrupts seen while the process runs.
    pub interrupt: InterruptFlag,
}

/// Process-creation seam.
pub trait ProcessSpawner {
    /// Run the invocation to completion.
    ///
    /// An `Err` means the program could not be started.
    fn run(
        &self,
        invocation: &Invocation,
        stdio: StdioMode,
        limits: &RunLimits,
    ) -> io::Result<CommandResult>;
}

/// Spawns real processes with `std::process::Command`.
///
/// Captured checks run in their own process group on Unix: they never
/// read the terminal, and a timeout or interrupt can then kill every
/// process the check started, not only the shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    fn run(
        &self,
        invocation: &Invocation,
        stdio: StdioMode,
        limits: &RunLimits,
    ) -> io::Result<CommandResult> {
        let start = Instant::now();

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);

        if let Some(cwd) = &invocation.cwd {
            cmd.current_dir(cwd);
        }

        match stdio {
            StdioMode::Inherit => {
                cmd.stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());
            }
            StdioMode::CaptureStdout => {
                cmd.stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::null());
            }
        }
        let isolated = isolate(&mut cmd, stdio);

        let mut child = cmd.spawn()?;

        // Drain stdout on a separate thread so a chatty check cannot
        // block on a full pipe while we wait on it.
        let reader = child.stdout.take().map(|mut out| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = out.read_to_end(&mut buf);
                String::from_utf8_lossy(&buf).to_string()
            })
        });

        let termination = supervise(&mut child, isolated, start, limits)?;

        // After a kill, a surviving grandchild may still hold the pipe;
        // the reader is left detached instead of waited on.
        let stdout = match (termination, reader) {
            (Termination::TimedOut | Termination::Interrupted, _) | (_, None) => String::new(),
            (_, Some(handle)) => handle.join().unwrap_or_default(),
        };

        Ok(CommandResult::new(termination, stdout, start.elapsed()))
    }
}

/// Put captured commands in a fresh process group.
#[cfg(unix)]
fn isolate(cmd: &mut Command, stdio: StdioMode) -> bool {
    use std::os::unix::process::CommandExt;

    if stdio == StdioMode::CaptureStdout {
        cmd.process_group(0);
        true
    } else {
        false
    }
}

#[cfg(not(unix))]
fn isolate(_cmd: &mut Command, _stdio: StdioMode) -> bool {
    false
}

/// Wait for the child within `limits`.
///
/// An isolated child does not see the terminal interrupt, so it is
/// killed here once the flag is raised.
fn supervise(
    child: &mut Child,
    isolated: bool,
    start: Instant,
    limits: &RunLimits,
) -> io::Result<Termination> {
    if limits.timeout.is_none() && !isolated {
        return Ok(Termination::from_status(child.wait()?));
    }

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Termination::from_status(status));
        }
        if limits.timeout.is_some_and(|limit| start.elapsed() >= limit) {
            debug!("Killing pid {} after {:?}", child.id(), start.elapsed());
            stop(child, isolated)?;
            return Ok(Termination::TimedOut);
        }
        if isolated && limits.interrupt.is_raised() {
            debug!("Killing pid {} on interrupt", child.id());
            stop(child, isolated)?;
            return Ok(Termination::Interrupted);
        }
        thread::sleep(WAIT_POLL);
    }
}

fn stop(child: &mut Child, isolated: bool) -> io::Result<()> {
    if isolated {
        kill_group(child);
    }
    let _ = child.kill();
    child.wait()?;
    Ok(())
}

#[cfg(unix)]
fn kill_group(child: &Child) {
    // The child leads its group, so the group id is its pid.
    unsafe {
        libc::killpg(child.id() as libc::pid_t, libc::SIGKILL);
    }
}

#[cfg(not(unix))]
fn kill_group(_child: &Child) {}

/// Process state handed to the invoker explicitly.
#[derive(Debug, Clone)]
pub struct ShellContext {
    /// Platform used for interpreter dispatch.
    pub platform: Platform,

    /// Working directory for every command.
    pub cwd: Option<PathBuf>,

    /// Kill a subprocess that runs longer than this.
    pub timeout: Option<Duration>,

    /// Replace the platform's default interpreter binary.
    pub shell_program: Option<PathBuf>,

    /// Raised when the user interrupts the run.
    pub interrupt: InterruptFlag,
}

impl ShellContext {
    /// Context for `platform` with no timeout, inheriting the cwd.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            cwd: None,
            timeout: None,
            shell_program: None,
            interrupt: InterruptFlag::new(),
        }
    }

    /// Context describing the running host and its current directory.
    pub fn from_host() -> Result<Self> {
        let mut ctx = Self::new(Platform::current());
        ctx.cwd = Some(std::env::current_dir()?);
        Ok(ctx)
    }
}

/// Runs command strings through the host interpreter.
pub struct ShellInvoker {
    form: ShellForm,
    ctx: ShellContext,
    spawner: Box<dyn ProcessSpawner>,
}

impl ShellInvoker {
    /// Create an invoker that spawns real processes.
    pub fn new(ctx: ShellContext) -> Self {
        Self::with_spawner(ctx, Box::new(SystemSpawner))
    }

    /// Create an invoker with a custom process spawner.
    pub fn with_spawner(ctx: ShellContext, spawner: Box<dyn ProcessSpawner>) -> Self {
        let mut form = ShellForm::for_platform(ctx.platform);
        if let Some(program) = &ctx.shell_program {
            form = form.with_program(program.clone());
        }
        Self { form, ctx, spawner }
    }

    /// The interpreter form selected for this host.
    pub fn form(&self) -> &ShellForm {
        &self.form
    }

    /// The context this invoker was built with.
    pub fn context(&self) -> &ShellContext {
        &self.ctx
    }

    /// Build the invocation for a command without running it.
    pub fn invocation(&self, command: &str) -> Invocation {
        Invocation {
            program: self.form.program().clone(),
            args: vec![self.form.flag().to_string(), command.to_string()],
            cwd: self.ctx.cwd.clone(),
        }
    }

    /// Run a command with the terminal's streams attached.
    pub fn execute(&self, command: &str) -> Result<CommandResult> {
        self.run(command, StdioMode::Inherit)
    }

    /// Run a command quietly, capturing stdout.
    pub fn probe(&self, command: &str) -> Result<CommandResult> {
        self.run(command, StdioMode::CaptureStdout)
    }

    fn run(&self, command: &str, stdio: StdioMode) -> Result<CommandResult> {
        let invocation = self.invocation(command);

        if self.ctx.interrupt.is_raised() {
            debug!("Not starting '{}': run was interrupted", command);
            return Ok(CommandResult::new(
                Termination::Interrupted,
                String::new(),
                Duration::ZERO,
            ));
        }

        debug!(
            "Spawning {} {:?} ({:?})",
            invocation.program.display(),
            invocation.args,
            stdio
        );

        let limits = RunLimits {
            timeout: self.ctx.timeout,
            interrupt: self.ctx.interrupt.clone(),
        };
        let _running = self.ctx.interrupt.child_running();
        let mut result = self
            .spawner
            .run(&invocation, stdio, &limits)
            .map_err(|e| ThamilError::SpawnFailed {
                program: invocation.program.display().to_string(),
                message: e.to_string(),
            })?;

        if self.ctx.interrupt.is_raised() || result.termination.is_interrupt() {
            self.ctx.interrupt.raise();
            result.termination = Termination::Interrupted;
        }

        debug!(
            "'{}' finished: {} in {:?}",
            command, result.termination, result.duration
        );
        Ok(result)
    }
}
