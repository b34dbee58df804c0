//! Command-line interface for thamil.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`run`] - Wires settings, client, shell and UI into one run

pub mod args;
pub mod run;

pub use args::Cli;
pub use run::{CommandResult, RunCommand};
