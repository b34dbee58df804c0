//! thamil - fetch a named command preset and run it on this machine.
//!
//! A preset is a list of shell commands plus optional prerequisites
//! (check/install pairs). thamil fetches it from the preset service,
//! shows the plan, asks for consent, makes sure each prerequisite is
//! present, then runs the commands in order and stops at the first
//! failure.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`client`] - Preset retrieval over HTTP
//! - [`config`] - Settings loading and layering
//! - [`environment`] - Advisory host checks
//! - [`error`] - Error types and result aliases
//! - [`prerequisites`] - Check/install resolution
//! - [`preset`] - The preset document
//! - [`runner`] - Consent and run orchestration
//! - [`shell`] - Platform shell invocation
//! - [`ui`] - Prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use thamil::preset::Preset;
//!
//! let preset = Preset::from_json(r#"{"commands":["echo A"]}"#, "demo").unwrap();
//! assert_eq!(preset.keyword, "demo");
//! assert_eq!(preset.commands, vec!["echo A".to_string()]);
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod environment;
pub mod error;
pub mod prerequisites;
pub mod preset;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{Result, ThamilError};
