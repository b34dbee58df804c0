//! Terminal interrupt tracking.
//!
//! A terminal interrupt is delivered to the whole foreground process
//! group. While a child that shares the terminal is running, it receives
//! the interrupt directly: thamil only records it and stops once control
//! comes back. With no child running (fetching, between phases) the
//! handler ends the process on the spot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Exit code for a run the user interrupted (128 + SIGINT).
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Shared "the user pressed Ctrl+C" flag.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
    child_active: Arc<AtomicBool>,
}

impl InterruptFlag {
    /// A flag that is never raised by a signal (tests, library use).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flag wired to the process interrupt handler.
    ///
    /// Fails if another handler is already installed.
    pub fn install() -> Result<Self, ctrlc::Error> {
        let flag = Self::new();
        let handler = flag.clone();
        ctrlc::set_handler(move || {
            if handler.record() {
                eprintln!("\nInterrupted.");
                std::process::exit(INTERRUPTED_EXIT_CODE);
            }
        })?;
        Ok(flag)
    }

    /// Record an interrupt. Returns true when nothing is running that
    /// could wind the run down, i.e. the caller should exit now.
    fn record(&self) -> bool {
        self.raise();
        !self.is_child_active()
    }

    /// Mark the run as interrupted.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    /// Whether an interrupt has been seen.
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Whether a subprocess is currently running.
    pub fn is_child_active(&self) -> bool {
        self.child_active.load(Ordering::SeqCst)
    }

    /// Mark a subprocess as running until the guard is dropped.
    pub fn child_running(&self) -> ChildGuard {
        self.child_active.store(true, Ordering::SeqCst);
        ChildGuard {
            active: Arc::clone(&self.child_active),
        }
    }
}

/// Clears the "child running" mark on drop.
#[derive(Debug)]
pub struct ChildGuard {
    active: Arc<AtomicBool>,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }
}
