//! Error taxonomy for user actions.

use thiserror::Error;

/// Failures surfaced to the user as an error toast.
///
/// Every variant is recoverable: the user corrects the input or retries the
/// action by hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// Form or JSON input was rejected.
    #[error("{0}")]
    Validation(String),

    /// An analyze or suggest action was triggered with no pending tasks.
    #[error("{0}")]
    EmptyInput(String),

    /// The service answered with a non-2xx status.
    #[error("API error ({status}): {detail}")]
    Service {
        /// HTTP status code.
        status: u16,
        /// Response body, or the status text when the body was empty.
        detail: String,
    },

    /// The service answered 2xx with a body of the wrong shape.
    #[error("{0}")]
    Format(String),

    /// Pasted input was not a JSON array.
    #[error("{0}")]
    Parse(String),

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),
}

impl TaskError {
    /// Short kind name used in log events.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::EmptyInput(_) => "empty_input",
            Self::Service { .. } => "service",
            Self::Format(_) => "format",
            Self::Parse(_) => "parse",
            Self::Transport(_) => "transport",
        }
    }
}
