//! Runtime settings resolved from flags, environment and `.env`.

use std::env;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::task::Strategy;

/// Service base used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api/tasks";
/// Overrides the service base URL.
pub const API_BASE_ENV: &str = "TASKMATRIX_API_BASE";
/// Default strategy for `analyze`.
pub const STRATEGY_ENV: &str = "TASKMATRIX_STRATEGY";
/// Log filter, e.g. `debug` or `taskmatrix=trace`.
pub const LOG_ENV: &str = "TASKMATRIX_LOG";
/// Directory to record port traffic into.
pub const RECORD_ENV: &str = "TASKMATRIX_RECORD";
/// Cassette to replay instead of contacting the service.
pub const REPLAY_ENV: &str = "TASKMATRIX_REPLAY";

/// Effective configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Service base URL without a trailing slash.
    pub api_base: String,
    /// Strategy used when `analyze` is given none.
    pub strategy: Strategy,
    /// Root directory for recorded cassettes, when recording.
    pub record_dir: Option<PathBuf>,
    /// Cassette to replay, when replaying.
    pub replay_path: Option<PathBuf>,
}

impl Settings {
    /// Resolves settings from parsed flags plus the recording environment.
    ///
    /// Flags already carry their environment fallbacks (`TASKMATRIX_API_BASE`,
    /// `TASKMATRIX_STRATEGY`) through clap.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self::from_parts(
            &cli.api_base,
            cli.strategy,
            env::var_os(RECORD_ENV).map(PathBuf::from),
            env::var_os(REPLAY_ENV).map(PathBuf::from),
        )
    }

    /// Builds settings from already-resolved values.
    #[must_use]
    pub fn from_parts(
        api_base: &str,
        strategy: Option<Strategy>,
        record_dir: Option<PathBuf>,
        replay_path: Option<PathBuf>,
    ) -> Self {
        Self {
            api_base: normalize_base(api_base),
            strategy: strategy.unwrap_or_default(),
            record_dir: record_dir.filter(|p| !p.as_os_str().is_empty()),
            replay_path: replay_path.filter(|p| !p.as_os_str().is_empty()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_parts(DEFAULT_API_BASE, None, None, None)
    }
}

/// Trims whitespace and trailing slashes from a base URL.
#[must_use]
pub fn normalize_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.strategy, Strategy::Smart);
        assert!(settings.record_dir.is_none());
        assert!(settings.replay_path.is_none());
    }

    #[test]
    fn base_is_normalized() {
        assert_eq!(normalize_base(" http://svc/api/tasks// "), "http://svc/api/tasks");
        assert_eq!(normalize_base("  "), DEFAULT_API_BASE);
    }

    #[test]
    fn empty_paths_are_ignored() {
        let settings = Settings::from_parts(
            "http://svc",
            Some(Strategy::Deadline),
            Some(PathBuf::new()),
            Some(PathBuf::from("run.cassette.yaml")),
        );
        assert_eq!(settings.strategy, Strategy::Deadline);
        assert!(settings.record_dir.is_none());
        assert_eq!(settings.replay_path, Some(PathBuf::from("run.cassette.yaml")));
    }
}
