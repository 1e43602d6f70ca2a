//! Recording adapter for the `HttpTransport` port.

use std::sync::{Arc, Mutex};

use tracing::debug;

use super::{lock, result_output};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::transport::{HttpRequest, HttpTransport, TransportFuture};

/// Records each request and its reply while delegating to a real transport.
///
/// Interactions are tagged with the endpoint relative to the cassette's
/// service base. Transport failures are recorded too, so a replay reproduces
/// the same error toast.
pub struct RecordingHttpTransport {
    inner: Box<dyn HttpTransport>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingHttpTransport {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn HttpTransport>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl HttpTransport for RecordingHttpTransport {
    fn post_json(&self, request: &HttpRequest) -> TransportFuture<'_> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.post_json(&request).await;
            let input = serde_json::to_value(&request).unwrap_or_default();
            let mut recorder = lock(&recorder);
            debug!(endpoint = %recorder.endpoint_for(&request.url), ok = result.is_ok(), "recording request");
            recorder.record_request(&request.url, input, result_output(&result));
            drop(recorder);
            result
        })
    }
}
