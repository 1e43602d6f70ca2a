//! `taskmatrix suggest` command.

use std::io::Write;
use std::path::Path;

use crate::config::Settings;
use crate::context::ServiceContext;

/// Fetches the service's top suggestions for the tasks in `file`.
///
/// # Errors
///
/// Returns an error string if the file cannot be read, the tasks do not
/// validate, or the service call fails.
pub async fn run<W: Write>(
    ctx: &ServiceContext,
    settings: &Settings,
    file: &Path,
    out: &mut W,
) -> Result<(), String> {
    let mut app = super::load_file(ctx, settings, file)?;
    app.suggest(ctx, |notifier| eprintln!("{}", notifier.status()))
        .await
        .map_err(|e| e.to_string())?;

    let now = ctx.clock.now();
    write!(out, "{}{}", app.results_view(), app.matrix_view(now))
        .map_err(|e| format!("write error: {e}"))
}
