//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Overrides;
use crate::ui::OutputMode;

/// thamil - fetch a named command preset and run it on this machine.
#[derive(Debug, Parser)]
#[command(name = "thamil")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the preset to fetch and run (e.g. setup-node)
    #[arg(value_name = "KEYWORD", value_parser = non_blank)]
    pub keyword: String,

    /// Path to config file (overrides ~/.thamil/config.yml)
    #[arg(short, long, env = "THAMIL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the preset service
    #[arg(long, env = "THAMIL_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Run without asking for confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Never prompt; unanswered prompts take their default
    #[arg(long)]
    pub non_interactive: bool,

    /// Fetch and show the plan without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Require prerequisite checks to print something as well as exit 0
    #[arg(long, env = "THAMIL_STRICT_CHECKS")]
    pub strict_checks: bool,

    /// Kill any command that runs longer than this many seconds
    #[arg(long, env = "THAMIL_COMMAND_TIMEOUT", value_name = "SECS")]
    pub command_timeout: Option<u64>,

    /// Show verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Output mode selected by `--verbose`/`--quiet`.
    pub fn output_mode(&self) -> OutputMode {
        if self.quiet {
            OutputMode::Quiet
        } else if self.verbose {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }

    /// Settings overrides carried by flags and environment variables.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_url: self.api_url.clone(),
            command_timeout_secs: self.command_timeout,
            strict_checks: self.strict_checks,
        }
    }
}

fn non_blank(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("keyword must not be blank".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}
