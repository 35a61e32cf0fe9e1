//! The `tilesmith` command-line tool
//!
//! Commands:
//! - `validate`: check tilesets, Wang sets and maps, exit non-zero on failure
//! - `inspect`: print a tileset summary
//! - `export`: dump a tileset as JSON

pub mod args;
pub mod commands;
pub mod config;

pub use args::{parse_args, ArgsError, Cli, Command, ValidateArgs, USAGE};
pub use commands::{run_export, run_inspect, run_validate, CliError, ValidateSummary};
pub use config::{Config, ConfigError, ValidateConfig};

use std::io::Write;
use tracing::error;
use tracing_subscriber::EnvFilter;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILED: u8 = 1;
pub const EXIT_USAGE: u8 = 2;

/// Install the log subscriber. `RUST_LOG` wins unless `--verbose` is given.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tilesmith=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tilesmith=info"))
    };
    // A second install (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run a parsed command line and map the outcome to an exit code
pub fn run(cli: Cli) -> u8 {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match &cli.command {
        Command::Help => writeln!(out, "{USAGE}").map(|()| true).map_err(CliError::from),
        Command::Version => writeln!(out, "tilesmith {}", env!("CARGO_PKG_VERSION"))
            .map(|()| true)
            .map_err(CliError::from),
        Command::Validate(args) => run_validate(args, &mut out).map(|summary| summary.passed),
        Command::Inspect { path } => run_inspect(path, &mut out).map(|()| true),
        Command::Export { path, output } => {
            run_export(path, output.as_deref(), &mut out).map(|()| true)
        }
    };
    match result {
        Ok(true) => EXIT_OK,
        Ok(false) => EXIT_FAILED,
        Err(e) => {
            error!("{e}");
            EXIT_FAILED
        }
    }
}

/// Parse arguments, install logging and run. Usage errors exit with 2.
pub fn main_with_args<I>(args: I) -> u8
where
    I: IntoIterator<Item = String>,
{
    let cli = match parse_args(args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}\n\n{USAGE}");
            return EXIT_USAGE;
        }
    };
    init_logging(cli.verbose);
    run(cli)
}
