//! thamil CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use thamil::cli::{Cli, RunCommand};
use thamil::shell::{is_ci, InterruptFlag};
use thamil::ui::create_ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr; stdout carries narration only.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("thamil=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("thamil=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("thamil starting with args: {:?}", cli);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let interrupt = InterruptFlag::install().unwrap_or_else(|e| {
        tracing::warn!("Could not install interrupt handler: {}", e);
        InterruptFlag::new()
    });

    let is_interactive = !cli.non_interactive && !is_ci();
    let mut ui = create_ui(is_interactive, cli.output_mode());

    match RunCommand::from_cli(&cli, interrupt).execute(ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
