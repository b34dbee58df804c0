//! Interactive terminal UI.

use console::Term;
use std::io::{IsTerminal, Write};

use crate::error::Result;

use super::{
    confirm_on, NonInteractiveUI, OutputMode, ProgressSpinner, Prompt, SpinnerHandle,
    ThamilTheme, UserInterface,
};

/// UI for a person at a terminal: colors, spinners and a real prompt.
///
/// Narration and the plan go to stdout; warnings and errors to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: ThamilTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: ThamilTheme::detect(),
            mode,
        }
    }

    fn out(&mut self, line: &str) {
        writeln!(self.out, "{}", line).ok();
    }

    fn err(&mut self, line: &str) {
        writeln!(self.err, "{}", line).ok();
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_narration() {
            self.out(msg);
        }
    }

    fn success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.out(&line);
    }

    fn warning(&mut self, msg: &str) {
        let line = self.theme.format_warning(msg);
        self.err(&line);
    }

    fn error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.err(&line);
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        confirm_on(prompt, &self.out)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_narration() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_plan(&mut self, title: &str, lines: &[String]) {
        let header = self.theme.format_header(title);
        self.out("");
        self.out(&header);
        for line in lines {
            self.out(line);
        }
        self.out("");
    }

    fn show_error_block(&mut self, command: &str, hint: Option<&str>) {
        for line in self.theme.error_block(command, hint) {
            self.err(&line);
        }
    }

    fn is_interactive(&self) -> bool {
        self.out.is_term() && std::io::stdin().is_terminal()
    }
}

/// Pick the UI for this process.
///
/// Falls back to [`NonInteractiveUI`] when `interactive` is false or
/// when stdin/stdout are not attached to a terminal.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() && std::io::stdin().is_terminal() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
