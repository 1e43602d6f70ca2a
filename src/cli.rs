//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{API_BASE_ENV, DEFAULT_API_BASE, STRATEGY_ENV};
use crate::task::Strategy;

/// Top-level CLI parser for `taskmatrix`.
#[derive(Debug, Parser)]
#[command(name = "taskmatrix", version, about = "Prioritize tasks with a remote scoring service")]
pub struct Cli {
    /// Base URL of the task analysis service.
    #[arg(long, global = true, env = API_BASE_ENV, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Default scoring strategy.
    #[arg(long, global = true, env = STRATEGY_ENV, value_enum)]
    pub strategy: Option<Strategy>,

    /// Log filter, e.g. `debug` or `taskmatrix=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// The command to execute; an interactive session when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start an interactive session.
    Session,
    /// Score the tasks in a JSON file and print the results and matrix.
    Analyze {
        /// JSON array of task objects.
        #[arg(long)]
        file: PathBuf,
    },
    /// Print the service's top suggestions for the tasks in a JSON file.
    Suggest {
        /// JSON array of task objects.
        #[arg(long)]
        file: PathBuf,
    },
}
