//! Terminal client for a remote task-prioritization service.
//!
//! Tasks are collected through an interactive session or a JSON file, sent
//! to the service for scoring, and rendered as priority cards plus an
//! Eisenhower matrix.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cassette;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod notify;
pub mod ports;
pub mod render;
pub mod store;
pub mod task;
pub mod validate;

#[cfg(test)]
mod testing;

use clap::error::ErrorKind;
use clap::Parser;

use crate::config::Settings;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    logging::init(cli.log_level.as_deref());

    let settings = Settings::from_cli(&cli);
    tracing::debug!(api_base = %settings.api_base, strategy = %settings.strategy, "settings resolved");
    commands::dispatch(cli.command.as_ref(), &settings)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_prints_help() {
        assert!(run(["taskmatrix", "--help"]).is_ok());
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["taskmatrix", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_errors_on_missing_task_file() {
        let result = run(["taskmatrix", "analyze", "--file", "/nonexistent/tasks.json"]);
        assert!(result.unwrap_err().contains("could not read"));
    }
}
