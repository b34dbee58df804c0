//! How much thamil prints.

/// Output verbosity, chosen with `--verbose` / `--quiet`.
///
/// Errors, warnings, the plan and the consent question are shown in
/// every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Also show check output and other diagnostics.
    Verbose,
    /// Narrate each phase and command.
    #[default]
    Normal,
    /// Outcome lines only.
    Quiet,
}

impl OutputMode {
    /// Narration: fetch progress, "Running: ..." lines, spinners.
    pub fn shows_narration(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Diagnostics meant for `--verbose`.
    pub fn shows_detail(self) -> bool {
        matches!(self, Self::Verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_hides_narration() {
        assert!(OutputMode::Verbose.shows_narration());
        assert!(OutputMode::Normal.shows_narration());
        assert!(!OutputMode::Quiet.shows_narration());
    }

    #[test]
    fn only_verbose_shows_detail() {
        assert!(OutputMode::Verbose.shows_detail());
        assert!(!OutputMode::Normal.shows_detail());
        assert!(!OutputMode::Quiet.shows_detail());
    }

    #[test]
    fn normal_is_default() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }
}
