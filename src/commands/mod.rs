//! Command dispatch and handlers.

pub mod analyze;
pub mod session;
pub mod suggest;

use std::io;
use std::path::Path;

use crate::app::AppState;
use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Settings;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler; no command starts a session.
///
/// `TASKMATRIX_REPLAY=<file>` answers every port from a cassette.
/// Otherwise, when `TASKMATRIX_RECORD=<dir>` is set, all port interactions
/// are recorded to per-port cassette files in that directory.
///
/// # Errors
///
/// Returns an error string if the context cannot be built or the selected
/// command handler fails.
pub fn dispatch(command: Option<&Command>, settings: &Settings) -> Result<(), String> {
    let (ctx, session) = if let Some(path) = &settings.replay_path {
        (ServiceContext::replaying(path)?, None)
    } else if let Some(dir) = &settings.record_dir {
        let (ctx, session) = ServiceContext::recording_at(dir, &settings.api_base)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    let result = dispatch_with_context(command, settings, &ctx);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(
    command: Option<&Command>,
    settings: &Settings,
    ctx: &ServiceContext,
) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;

    match command {
        None | Some(Command::Session) => runtime.block_on(session::run(
            ctx,
            settings,
            io::stdin().lock(),
            io::stdout().lock(),
        )),
        Some(Command::Analyze { file }) => {
            runtime.block_on(analyze::run(ctx, settings, file, &mut io::stdout().lock()))
        }
        Some(Command::Suggest { file }) => {
            runtime.block_on(suggest::run(ctx, settings, file, &mut io::stdout().lock()))
        }
    }
}

/// Reads a JSON task file into fresh application state.
fn load_file(ctx: &ServiceContext, settings: &Settings, file: &Path) -> Result<AppState, String> {
    let raw = std::fs::read_to_string(file)
        .map_err(|e| format!("could not read {}: {e}", file.display()))?;
    let mut app = AppState::new(settings.api_base.as_str(), settings.strategy);
    app.load_json(&raw, ctx.clock.now()).map_err(|e| e.to_string())?;
    Ok(app)
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
