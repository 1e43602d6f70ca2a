//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LOG_ENV;

/// Filter used when neither `--log-level` nor `TASKMATRIX_LOG` is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr subscriber.
///
/// Priority: explicit `level` > `TASKMATRIX_LOG` > [`DEFAULT_FILTER`]. A
/// second call is a no-op, so tests may run commands repeatedly.
pub fn init(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).ok(),
        None => EnvFilter::try_from_env(LOG_ENV).ok(),
    }
    .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
