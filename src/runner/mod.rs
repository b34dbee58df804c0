//! Preset execution orchestration.
//!
//! - [`PresetRunner`] drives a run: environment check, fetch, consent,
//!   prerequisites, commands
//! - [`ConsentGate`] shows the plan and asks before anything mutates the host
//! - [`RunStatus`] is the outcome, with its process exit code

pub mod consent;
pub mod preset;
pub mod status;

pub use consent::{Consent, ConsentGate, CONSENT_PROMPT_KEY};
pub use preset::{PresetRunner, RunOptions};
pub use status::{AbortReason, RunFailure, RunStatus};
