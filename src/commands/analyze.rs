//! `taskmatrix analyze` command.

use std::io::Write;
use std::path::Path;

use crate::config::Settings;
use crate::context::ServiceContext;

/// Scores the tasks in `file` and writes the results and the matrix to `out`.
///
/// The strategy comes from `--strategy`/`TASKMATRIX_STRATEGY`, default `smart`.
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
    app.analyze(ctx, None, |notifier| eprintln!("{}", notifier.status()))
        .await
        .map_err(|e| e.to_string())?;

    let now = ctx.clock.now();
    write!(out, "{}{}", app.results_view(), app.matrix_view(now))
        .map_err(|e| format!("write error: {e}"))
}
