//! Interactive prompts.

use console::Term;
use dialoguer::Confirm;

use crate::error::{Result, ThamilError};

use super::Prompt;

/// Convert dialoguer errors to ThamilError.
fn map_dialoguer_err(e: dialoguer::Error) -> ThamilError {
    ThamilError::Io(e.into())
}

/// Ask a yes/no question on the given terminal.
pub fn confirm_on(prompt: &Prompt, term: &Term) -> Result<bool> {
    Confirm::new()
        .with_prompt(&prompt.question)
        .default(prompt.default)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}
