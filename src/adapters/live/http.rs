//! Live adapter for the `HttpTransport` port using `reqwest`.

use reqwest::Client;
use tracing::debug;

use crate::ports::transport::{
    HttpReply, HttpRequest, HttpTransport, TransportError, TransportFuture,
};

/// Live transport that performs real HTTP requests.
///
/// No timeout is configured beyond what the underlying client applies.
pub struct LiveHttpTransport {
    client: Client,
}

impl LiveHttpTransport {
    /// Creates a new live transport.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for LiveHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for LiveHttpTransport {
    fn post_json(&self, request: &HttpRequest) -> TransportFuture<'_> {
        let url = request.url.clone();
        let body = request.body.clone();

        Box::pin(async move {
            let response = self.client.post(&url).json(&body).send().await.map_err(
                |e| -> TransportError {
                    format!("could not reach {url}: {e}").into()
                },
            )?;

            let status = response.status();
            let body = response.text().await.map_err(
                |e| -> TransportError {
                    format!("failed to read response from {url}: {e}").into()
                },
            )?;
            debug!(%url, status = status.as_u16(), bytes = body.len(), "response received");

            Ok::<_, TransportError>(HttpReply {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let transport = LiveHttpTransport::new();
        let request = HttpRequest {
            url: "http://127.0.0.1:9/api/tasks/suggest/".into(),
            body: serde_json::json!([]),
        };
        let err = transport.post_json(&request).await.unwrap_err();
        assert!(err.to_string().contains("could not reach"));
    }
}
