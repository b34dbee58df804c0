//! Configuration for thamil.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use thamil::config::{load_settings, Overrides};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "api_url: http://localhost:5000\n").unwrap();
//!
//! let overrides = Overrides {
//!     command_timeout_secs: Some(60),
//!     ..Default::default()
//! };
//! let settings = load_settings(Some(&path), &overrides).unwrap();
//! assert_eq!(settings.api_url, "http://localhost:5000");
//! assert_eq!(settings.command_timeout_secs, Some(60));
//! ```
//!
//! # Layering
//!
//! Later layers override earlier ones:
//! 1. Built-in defaults
//! 2. A YAML file (`--config`, `THAMIL_CONFIG`, or `~/.thamil/config.yml`)
//! 3. Environment variables and command-line flags ([`Overrides`])

pub mod loader;
pub mod schema;

pub use loader::{default_config_path, load_settings, load_settings_file, parse_settings};
pub use schema::{Overrides, Settings, DEFAULT_API_URL};
