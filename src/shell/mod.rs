//! Shell command execution.
//!
//! - [`ShellInvoker`] runs command strings through `sh -c` or `cmd /C`
//! - [`ProcessSpawner`] is the process-creation seam; [`SystemSpawner`]
//!   spawns for real, [`RecordingSpawner`] records for tests
//! - [`InterruptFlag`] tracks terminal interrupts during a run

pub mod command;
pub mod interrupt;
pub mod mock;
pub mod platform;

pub use command::{
    CommandResult, Invocation, ProcessSpawner, RunLimits, ShellContext, ShellInvoker, StdioMode,
    SystemSpawner, Termination,
};
pub use interrupt::{ChildGuard, InterruptFlag, INTERRUPTED_EXIT_CODE};
pub use mock::RecordingSpawner;
pub use platform::{is_ci, Platform, ShellForm};
