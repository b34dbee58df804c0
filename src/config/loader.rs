//! Settings file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ThamilError};

use super::schema::{Overrides, Settings};

/// `~/.thamil/config.yml`, if a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".thamil").join("config.yml"))
}

/// Build the effective settings.
///
/// An `explicit` path must exist. Without one, the default path is read
/// when present and skipped otherwise.
pub fn load_settings(explicit: Option<&Path>, overrides: &Overrides) -> Result<Settings> {
    let mut settings = match explicit {
        Some(path) => load_settings_file(path)?,
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(path) => load_settings_file(&path)?,
            None => Settings::default(),
        },
    };

    settings.apply(overrides);
    settings.validate()?;
    debug!("Effective settings: {:?}", settings);
    Ok(settings)
}

/// Load settings from a single YAML file.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ThamilError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ThamilError::Io(e)
        }
    })?;

    debug!("Loading settings from {}", path.display());
    parse_settings(&content, path)
}

/// Parse YAML content into [`Settings`].
///
/// An empty document yields the defaults.
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(content).map_err(|e| ThamilError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prerequisites::CheckPolicy;
    use tempfile::TempDir;

    fn write(temp: &TempDir, content: &str) -> PathBuf {
        let path = temp.path().join("config.yml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "api_url: http://localhost:5000\ncheck_policy: strict\ncommand_timeout_secs: 120\n",
        );

        let settings = load_settings(Some(&path), &Overrides::default()).unwrap();

        assert_eq!(settings.api_url, "http://localhost:5000");
        assert_eq!(settings.check_policy, CheckPolicy::Strict);
        assert_eq!(settings.command_timeout_secs, Some(120));
        assert_eq!(settings.request_timeout_secs, 30);
    }

    #[test]
    fn overrides_beat_file() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "api_url: http://from-file\n");

        let overrides = Overrides {
            api_url: Some("http://from-flag".into()),
            ..Default::default()
        };
        let settings = load_settings(Some(&path), &overrides).unwrap();

        assert_eq!(settings.api_url, "http://from-flag");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.yml");

        let err = load_settings(Some(&path), &Overrides::default()).unwrap_err();
        assert!(matches!(err, ThamilError::ConfigNotFound { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "api_uri: http://typo\n");

        let err = load_settings_file(&path).unwrap_err();
        match err {
            ThamilError::ConfigParseError { message, .. } => {
                assert!(message.contains("api_uri"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_file_is_defaults() {
        let settings = parse_settings("\n", Path::new("config.yml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn invalid_values_fail_validation() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "request_timeout_secs: 0\n");

        let err = load_settings(Some(&path), &Overrides::default()).unwrap_err();
        assert!(matches!(err, ThamilError::InvalidConfig { .. }));
    }

    #[test]
    fn min_memory_can_be_disabled() {
        let settings = parse_settings("min_available_memory_mb: null\n", Path::new("c.yml")).unwrap();
        assert_eq!(settings.min_available_memory_mb, None);
    }
}
