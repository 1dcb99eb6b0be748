//! raise CLI entry point.

use clap::Parser;
use raise::cli::{self, Cli, EXIT_ERROR};
use raise::report;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// `--debug` forces debug level, otherwise `RUST_LOG` applies, defaulting to
/// warnings only. Logs go to stderr so reports stay on stdout.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("raise=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("raise=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if cli.no_color {
        report::disable_colors();
    }

    let exit_code = match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
