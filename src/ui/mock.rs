//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. Confirmation answers are scripted
//! per prompt key.
//!
//! # Example
//!
//! ```
//! use thamil::ui::{MockUI, Prompt, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_confirm("confirm_run", true);
//!
//! ui.message("Running: echo A");
//! assert!(ui.confirm(&Prompt::confirm("confirm_run", "Proceed?", false)).unwrap());
//!
//! assert!(ui.has_message("Running: echo A"));
//! assert_eq!(ui.prompts_shown(), &["confirm_run".to_string()]);
//! ```

use std::collections::HashMap;

use crate::error::{Result, ThamilError};

use super::{OutputMode, Prompt, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    error_blocks: Vec<(String, Option<String>)>,
    confirm_answers: HashMap<String, bool>,
    prompts_shown: Vec<String>,
    prompt_error: Option<std::io::ErrorKind>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Script the answer for a confirmation key.
    ///
    /// Unscripted keys answer with the prompt's default.
    pub fn set_confirm(&mut self, key: &str, answer: bool) {
        self.confirm_answers.insert(key.to_string(), answer);
    }

    /// Make every prompt fail, as if input were unavailable.
    pub fn fail_prompts(&mut self) {
        self.prompt_error = Some(std::io::ErrorKind::UnexpectedEof);
    }

    /// Make every prompt fail as a Ctrl+C in raw mode does.
    pub fn interrupt_prompts(&mut self) {
        self.prompt_error = Some(std::io::ErrorKind::Interrupted);
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all plan titles shown.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured error blocks as `(command, hint)`.
    pub fn error_blocks(&self) -> &[(String, Option<String>)] {
        &self.error_blocks
    }

    /// Keys of all prompts shown, in order.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a message containing `msg` was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a success message containing `msg` was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a warning containing `msg` was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if an error containing `msg` was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        self.prompts_shown.push(prompt.key.clone());

        if let Some(kind) = self.prompt_error {
            return Err(ThamilError::Io(std::io::Error::new(kind, "input unavailable")));
        }

        Ok(self
            .confirm_answers
            .get(&prompt.key)
            .copied()
            .unwrap_or(prompt.default))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.messages.push(message.to_string());
        Box::new(MockSpinner)
    }

    fn show_plan(&mut self, title: &str, lines: &[String]) {
        self.headers.push(title.to_string());
        self.messages.extend_from_slice(lines);
    }

    fn show_error_block(&mut self, command: &str, hint: Option<&str>) {
        self.error_blocks
            .push((command.to_string(), hint.map(String::from)));
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

/// Spinner that does nothing.
#[derive(Debug)]
pub struct MockSpinner;

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}
    fn finish_success(&mut self, _msg: &str) {}
    fn finish_error(&mut self, _msg: &str) {}
}
