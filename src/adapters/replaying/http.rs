//! Replaying adapter for the `HttpTransport` port.

use std::sync::Mutex;

use tracing::warn;

use super::{next_recorded, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::transport::{HttpReply, HttpRequest, HttpTransport, TransportFuture};

/// Answers requests with recorded replies instead of contacting a server.
///
/// Replies are served in the order they were captured. A request whose URL
/// does not end with the recorded endpoint still gets the reply, with a
/// warning, since the service base may differ between recording and replay.
pub struct ReplayingHttpTransport {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingHttpTransport {
    /// Creates a replaying transport from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl HttpTransport for ReplayingHttpTransport {
    fn post_json(&self, request: &HttpRequest) -> TransportFuture<'_> {
        let interaction = next_recorded(&self.replayer, "http", "post_json");
        if let Some(endpoint) = interaction.endpoint.as_deref() {
            if !request.url.ends_with(endpoint) {
                warn!(
                    seq = interaction.seq,
                    recorded = endpoint,
                    requested = %request.url,
                    "replaying a reply recorded for another endpoint"
                );
            }
        }
        let output = interaction.output;
        Box::pin(async move { replay_result::<HttpReply>(output) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn transport(outputs: Vec<serde_json::Value>) -> ReplayingHttpTransport {
        let interactions = outputs
            .into_iter()
            .zip(0..)
            .map(|(output, seq)| Interaction {
                seq,
                port: "http".into(),
                method: "post_json".into(),
                endpoint: None,
                input: json!({}),
                output,
            })
            .collect();
        let cassette = Cassette {
            name: "http".into(),
            recorded_at: Utc::now(),
            service: "http://svc/api/tasks".into(),
            interactions,
        };
        ReplayingHttpTransport::new(CassetteReplayer::new(&cassette))
    }

    fn request() -> HttpRequest {
        HttpRequest { url: "http://svc/api/tasks/suggest/".into(), body: json!([]) }
    }

    #[tokio::test]
    async fn replays_replies_then_errors() {
        let transport = transport(vec![
            json!({"Ok": {"status": 200, "status_text": "OK", "body": "{\"suggested_tasks\": []}"}}),
            json!({"Err": "connection refused"}),
        ]);

        let reply = transport.post_json(&request()).await.unwrap();
        assert_eq!(
            reply,
            HttpReply {
                status: 200,
                status_text: "OK".into(),
                body: "{\"suggested_tasks\": []}".into()
            }
        );

        let err = transport.post_json(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn endpoint_mismatch_still_serves_reply() {
        let cassette = Cassette {
            name: "http".into(),
            recorded_at: Utc::now(),
            service: "http://svc/api/tasks".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "http".into(),
                method: "post_json".into(),
                endpoint: Some("analyze/?strategy=smart".into()),
                input: json!({}),
                output: json!({"Ok": {"status": 200, "body": "{}"}}),
            }],
        };
        let transport = ReplayingHttpTransport::new(CassetteReplayer::new(&cassette));
        let reply = transport.post_json(&request()).await.unwrap();
        assert_eq!(reply.status, 200);
        assert_eq!(reply.status_text, "");
    }
}
