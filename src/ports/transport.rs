//! HTTP transport port for reaching the analysis service.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Error produced when no reply could be obtained.
pub type TransportError = Box<dyn Error + Send + Sync>;

/// Boxed future returned by [`HttpTransport::post_json`], keeping the trait
/// dyn-compatible.
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpReply, TransportError>> + Send + 'a>>;

/// A JSON `POST` to send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Absolute URL including the query string.
    pub url: String,
    /// JSON request body.
    pub body: serde_json::Value,
}

/// Whatever the server answered, successful or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpReply {
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase for the status, possibly empty.
    #[serde(default)]
    pub status_text: String,
    /// Raw response body.
    #[serde(default)]
    pub body: String,
}

impl HttpReply {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends JSON requests over HTTP.
///
/// Non-2xx answers are returned as an `Ok` reply; only failures to obtain
/// any answer are errors.
pub trait HttpTransport: Send + Sync {
    /// Posts `request.body` as JSON to `request.url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection fails or the body cannot be read.
    fn post_json(&self, request: &HttpRequest) -> TransportFuture<'_>;
}
