//! Binary entrypoint for the `taskmatrix` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // `.env` may supply TASKMATRIX_API_BASE, TASKMATRIX_STRATEGY and TASKMATRIX_LOG.
    dotenvy::dotenv().ok();
    // Recording and replay are handled in commands::dispatch via
    // TASKMATRIX_RECORD=<dir> and TASKMATRIX_REPLAY=<file>.
    match taskmatrix::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
