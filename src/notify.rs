//! Toasts, status line, loading indicator and the analyze hint.
//!
//! Expiry is evaluated against timestamps from the `Clock` port rather than
//! timers, so a toast is "dismissed" once `now` passes its deadline.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use colored::Colorize;

/// How long a toast stays visible.
pub const TOAST_DURATION_MS: i64 = 2600;
/// How long the analyze hint stays visible.
pub const HINT_DURATION_MS: i64 = 5000;
/// Status shown before anything happens and after a clear.
pub const STATUS_IDLE: &str = "Waiting for input…";
/// Hint text nudging the user towards `analyze`.
pub const HINT_TEXT: &str = "Ready? Run `analyze` to score your tasks.";

/// Toast styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    /// Neutral information.
    #[default]
    Info,
    /// Something went wrong.
    Error,
    /// An action completed.
    Success,
}

/// A transient message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Message text.
    pub message: String,
    /// Styling.
    pub severity: Severity,
    /// Moment the toast is dismissed.
    pub expires_at: DateTime<Utc>,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self.severity {
            Severity::Info => self.message.normal(),
            Severity::Error => self.message.red().bold(),
            Severity::Success => self.message.green(),
        };
        write!(f, "[{text}]")
    }
}

/// Notification and status state for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notifier {
    toast: Option<Toast>,
    status: String,
    loading: bool,
    hint_until: Option<DateTime<Utc>>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self { toast: None, status: STATUS_IDLE.to_string(), loading: false, hint_until: None }
    }
}

impl Notifier {
    /// Creates a notifier with the idle status and nothing showing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a toast, replacing any pending one and its dismissal time.
    pub fn show_toast(&mut self, message: impl Into<String>, severity: Severity, now: DateTime<Utc>) {
        self.toast = Some(Toast {
            message: message.into(),
            severity,
            expires_at: now + Duration::milliseconds(TOAST_DURATION_MS),
        });
    }

    /// The toast still visible at `now`, if any.
    #[must_use]
    pub fn active_toast(&self, now: DateTime<Utc>) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| now < t.expires_at)
    }

    /// Sets the status line.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Current status line.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Raises or lowers the loading indicator, updating the status when a
    /// message is given.
    pub fn set_loading(&mut self, loading: bool, message: &str) {
        self.loading = loading;
        if !message.is_empty() {
            self.status = message.to_string();
        }
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Shows the analyze hint for [`HINT_DURATION_MS`].
    pub fn show_hint(&mut self, now: DateTime<Utc>) {
        self.hint_until = Some(now + Duration::milliseconds(HINT_DURATION_MS));
    }

    /// Whether the hint is visible at `now`.
    #[must_use]
    pub fn hint_visible(&self, now: DateTime<Utc>) -> bool {
        self.hint_until.is_some_and(|until| now < until)
    }
}
