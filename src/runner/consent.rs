//! Consent before host mutation.
//!
//! The plan is always shown before the question. When no answer can be
//! read (closed stdin, dialoguer error), the gate declines. Ctrl+C at a
//! raw-mode prompt arrives as an interrupted read, not a signal, and is
//! reported as an interrupt.

use tracing::{debug, warn};

use crate::preset::Preset;
use crate::ui::{Prompt, UserInterface};

/// Prompt key, also used for the `THAMIL_PROMPT_CONFIRM_RUN` override.
pub const CONSENT_PROMPT_KEY: &str = "confirm_run";

/// The user's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consent {
    Granted,
    Declined,
    /// Ctrl+C at the prompt.
    Interrupted,
}

/// Shows the plan and asks whether to run it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsentGate {
    assume_yes: bool,
}

impl ConsentGate {
    /// Create a gate; `assume_yes` pre-grants consent (`--yes`).
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    /// Print what the preset is going to do.
    pub fn present(&self, ui: &mut dyn UserInterface, preset: &Preset) {
        ui.show_plan(
            &format!("Preset \"{}\"", preset.keyword),
            &preset.plan_lines(),
        );
    }

    /// Show the plan and ask whether to run it.
    pub fn confirm(&self, ui: &mut dyn UserInterface, preset: &Preset) -> Consent {
        self.present(ui, preset);

        if self.assume_yes {
            ui.message("Proceeding without prompt (--yes).");
            return Consent::Granted;
        }

        if !ui.is_interactive() {
            debug!("No terminal; answering from THAMIL_PROMPT_CONFIRM_RUN or the default");
        }

        let question = format!(
            "Run {} on this machine?",
            describe_actions(preset.prerequisites.len(), preset.commands.len())
        );

        match ui.confirm(&Prompt::confirm(CONSENT_PROMPT_KEY, question, false)) {
            Ok(true) => Consent::Granted,
            Ok(false) => Consent::Declined,
            Err(e) if e.is_interrupted() => Consent::Interrupted,
            Err(e) => {
                warn!("Consent prompt failed: {}", e);
                ui.warning("Could not read an answer; nothing will be run.");
                Consent::Declined
            }
        }
    }
}

fn describe_actions(prerequisites: usize, commands: usize) -> String {
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("{} {}", n, word)
        } else {
            format!("{} {}s", n, word)
        }
    };

    if prerequisites == 0 {
        plural(commands, "command")
    } else {
        format!(
            "{} and {}",
            plural(prerequisites, "prerequisite"),
            plural(commands, "command")
        )
    }
}
