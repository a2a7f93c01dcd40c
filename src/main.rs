//! sod-install entry point.

use std::process::ExitCode;

use clap::Parser;
use sod_installer::cli::{Cli, InstallCommand};
use sod_installer::runner::report_error;
use sod_installer::shell::is_ci;
use sod_installer::ui::create_ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Exit status for any fatal installer error.
const FAILURE: u8 = 255;

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("sod_installer=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sod_installer=info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("sod-install starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let is_interactive = !cli.non_interactive && !is_ci();
    let mut ui = create_ui(is_interactive, cli.output_mode());

    let result = InstallCommand::from_cli(&cli).and_then(|command| command.execute(ui.as_mut()));

    match result {
        Ok(summary) => {
            tracing::debug!("Install finished: {:?}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(ui.as_mut(), &e);
            ExitCode::from(FAILURE)
        }
    }
}
