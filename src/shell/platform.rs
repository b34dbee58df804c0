//! Platform identity and shell invocation forms.

use std::path::PathBuf;

/// Host platform family, as far as shell dispatch is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows: commands go through the command processor.
    Windows,
    /// Everything else: commands go through a POSIX shell.
    Posix,
}

impl Platform {
    /// Classify an OS name as reported by `std::env::consts::OS`.
    pub fn from_os(os: &str) -> Self {
        if os.eq_ignore_ascii_case("windows") {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// The platform this process is running on.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }
}

/// How a command string is handed to the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellForm {
    /// `<shell> -c <command>`
    Posix { shell: PathBuf },
    /// `<comspec> /C <command>`
    Cmd { comspec: PathBuf },
}

impl ShellForm {
    /// Default interpreter for a platform.
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Windows => ShellForm::Cmd {
                comspec: PathBuf::from("cmd.exe"),
            },
            Platform::Posix => ShellForm::Posix {
                shell: PathBuf::from("/bin/sh"),
            },
        }
    }

    /// Same form, with a different interpreter binary.
    pub fn with_program(self, program: PathBuf) -> Self {
        match self {
            ShellForm::Posix { .. } => ShellForm::Posix { shell: program },
            ShellForm::Cmd { .. } => ShellForm::Cmd { comspec: program },
        }
    }

    /// Interpreter binary.
    pub fn program(&self) -> &PathBuf {
        match self {
            ShellForm::Posix { shell } => shell,
            ShellForm::Cmd { comspec } => comspec,
        }
    }

    /// The "run this string" flag.
    pub fn flag(&self) -> &'static str {
        match self {
            ShellForm::Posix { .. } => "-c",
            ShellForm::Cmd { .. } => "/C",
        }
    }
}

/// Check if running in a CI environment.
///
/// Used in `main()` to force non-interactive mode. Checks common CI
/// environment variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`,
/// `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_is_recognized() {
        assert_eq!(Platform::from_os("windows"), Platform::Windows);
        assert_eq!(Platform::from_os("Windows"), Platform::Windows);
    }

    #[test]
    fn everything_else_is_posix() {
        for os in ["linux", "macos", "freebsd", "android", ""] {
            assert_eq!(Platform::from_os(os), Platform::Posix, "os = {os:?}");
        }
    }

    #[test]
    fn windows_uses_command_processor() {
        let form = ShellForm::for_platform(Platform::Windows);
        assert_eq!(form.program(), &PathBuf::from("cmd.exe"));
        assert_eq!(form.flag(), "/C");
    }

    #[test]
    fn posix_uses_sh_dash_c() {
        let form = ShellForm::for_platform(Platform::Posix);
        assert_eq!(form.program(), &PathBuf::from("/bin/sh"));
        assert_eq!(form.flag(), "-c");
    }

    #[test]
    fn with_program_keeps_the_form() {
        let form = ShellForm::for_platform(Platform::Posix).with_program("/bin/bash".into());
        assert_eq!(
            form,
            ShellForm::Posix {
                shell: PathBuf::from("/bin/bash")
            }
        );
    }

    #[test]
    fn is_ci_does_not_panic() {
        let _ = is_ci();
    }
}
