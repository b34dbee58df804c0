//! Colors and glyphs.

use console::Style;

const BLOCK_TOP: &str = "┌─ Command ──────────────────────────";
const BLOCK_BOTTOM: &str = "└────────────────────────────────────";

/// Styles for status lines, the plan header and failure blocks.
#[derive(Debug, Clone)]
pub struct ThamilTheme {
    /// Passed checks and the final banner.
    pub success: Style,
    /// Advisory problems.
    pub warning: Style,
    /// Failures.
    pub error: Style,
    /// The plan title.
    pub header: Style,
    /// Command text inside a failure block.
    pub command: Style,
    /// Box-drawing borders.
    pub border: Style,
    /// Remediation hints.
    pub hint: Style,
}

impl Default for ThamilTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ThamilTheme {
    /// The colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            header: Style::new().bold().cyan(),
            command: Style::new().dim().italic(),
            border: Style::new().dim(),
            hint: Style::new().cyan().dim(),
        }
    }

    /// No styling at all.
    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            success: none.clone(),
            warning: none.clone(),
            error: none.clone(),
            header: none.clone(),
            command: none.clone(),
            border: none.clone(),
            hint: none,
        }
    }

    /// Colored when [`should_use_colors`] allows it, plain otherwise.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        self.success.apply_to(format!("✓ {}", msg)).to_string()
    }

    pub fn format_warning(&self, msg: &str) -> String {
        self.warning.apply_to(format!("⚠ {}", msg)).to_string()
    }

    pub fn format_error(&self, msg: &str) -> String {
        self.error.apply_to(format!("✗ {}", msg)).to_string()
    }

    pub fn format_header(&self, title: &str) -> String {
        self.header.apply_to(format!("▶ {}", title)).to_string()
    }

    /// Lines of the boxed "this command failed" block.
    pub fn error_block(&self, command: &str, hint: Option<&str>) -> Vec<String> {
        let mut lines = vec![
            format!("    {}", self.border.apply_to(BLOCK_TOP)),
            format!(
                "    {} {}",
                self.border.apply_to("│"),
                self.command.apply_to(command)
            ),
            format!("    {}", self.border.apply_to(BLOCK_BOTTOM)),
        ];

        if let Some(hint) = hint {
            lines.push(String::new());
            lines.push(format!("    {}", self.hint.apply_to(format!("Hint: {}", hint))));
        }
        lines
    }
}

/// Whether stdout should get ANSI colors.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}
