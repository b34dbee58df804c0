//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::Result;

use super::{parse_answer, OutputMode, Prompt, SpinnerHandle, ThamilTheme, UserInterface};

const PROMPT_ENV_PREFIX: &str = "THAMIL_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are never shown. A confirmation is answered from the
/// `THAMIL_PROMPT_<KEY>` environment variable when it holds a yes/no
/// value, and from the prompt's default otherwise.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: ThamilTheme,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            theme: ThamilTheme::plain(),
            env_overrides: overrides,
        }
    }

    /// The override for `prompt`, if it parses, else its default.
    fn answer_for(&self, prompt: &Prompt) -> bool {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        self.env_overrides
            .get(&env_key)
            .and_then(|v| parse_answer(v))
            .unwrap_or(prompt.default)
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_narration() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        let answer = self.answer_for(prompt);
        println!(
            "{} [non-interactive: {}]",
            prompt.question,
            if answer { "yes" } else { "no" }
        );
        Ok(answer)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_narration() {
            println!("{}", message);
        }
        Box::new(LineSpinner {
            mode: self.mode,
            theme: self.theme.clone(),
        })
    }

    fn show_plan(&mut self, title: &str, lines: &[String]) {
        println!();
        println!("{}", self.theme.format_header(title));
        for line in lines {
            println!("{}", line);
        }
        println!();
    }

    fn show_error_block(&mut self, command: &str, hint: Option<&str>) {
        for line in self.theme.error_block(command, hint) {
            eprintln!("{}", line);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints only the outcome line.
struct LineSpinner {
    mode: OutputMode,
    theme: ThamilTheme,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_narration() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }
}
