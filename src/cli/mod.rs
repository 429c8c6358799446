//! Command line interface for the firmware packager.
//!
//! Parses arguments, dispatches to the subcommand and turns any failure into
//! an `ERROR:` line plus exit code 1.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, RuntimeConfig};
pub use output::OutputManager;

use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let config = RuntimeConfig::from(&args);

    match execute(&args, &config).await {
        Ok(code) => Ok(code),
        Err(e) => {
            log::debug!("Command failed: {:?}", e);
            config.error(&e.to_string())?;
            for hint in e.recovery_suggestions() {
                config.hint(&hint)?;
            }
            Ok(1)
        }
    }
}

/// Validates and runs the parsed command.
pub async fn execute(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    match &args.command {
        Command::Ota(ota) => commands::execute_ota(ota, config).await,
        Command::Library(lib) => commands::execute_library(lib, config).await,
        Command::Inspect(inspect) => commands::execute_inspect(inspect, config).await,
    }
}
