//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::http::LiveHttpTransport;
use crate::adapters::recording::{RecordingClock, RecordingHttpTransport};
use crate::adapters::replaying::{ReplayingClock, ReplayingHttpTransport};
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::clock::Clock;
use crate::ports::transport::HttpTransport;

/// Bundles every port into a single context.
///
/// Constructors wire up live, recording or replaying adapters.
pub struct ServiceContext {
    /// Clock for toast expiry and due-date arithmetic.
    pub clock: Box<dyn Clock>,
    /// Transport used to reach the analysis service.
    pub transport: Box<dyn HttpTransport>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>, transport: Box<dyn HttpTransport>) -> Self {
        Self { clock, transport }
    }

    /// Creates a live context: system clock and real HTTP.
    #[must_use]
    pub fn live() -> Self {
        Self::new(Box::new(LiveClock), Box::new(LiveHttpTransport::new()))
    }

    /// Creates a live context whose traffic is captured by a recording
    /// session under `root`.
    ///
    /// The caller drops the context and then calls
    /// [`RecordingSession::finish`] to write the cassettes.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette directory cannot be created.
    pub fn recording_at(root: &Path, service: &str) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::at(root, service)?;
        let ctx = Self::new(
            Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&session.clock))),
            Box::new(RecordingHttpTransport::new(
                Box::new(LiveHttpTransport::new()),
                Arc::clone(&session.http),
            )),
        );
        Ok((ctx, session))
    }

    /// Creates a context that answers from a cassette instead of the network.
    ///
    /// `path` is either a single cassette file or a directory written by a
    /// [`RecordingSession`]. The clock is replayed too when it was recorded;
    /// otherwise the system clock is used.
    ///
    /// # Errors
    ///
    /// Returns an error if a cassette cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        if path.is_dir() {
            return Self::replaying_dir(path);
        }
        let cassette = CassetteReplayer::load(path)?;
        let clock: Box<dyn Clock> = if cassette.has_port("clock") {
            Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette)))
        } else {
            Box::new(LiveClock)
        };
        // Separate replayers keep per-port cursors independent.
        let transport = Box::new(ReplayingHttpTransport::new(CassetteReplayer::new(&cassette)));
        Ok(Self::new(clock, transport))
    }

    /// Replays a recording directory: `http.cassette.yaml` is required,
    /// `clock.cassette.yaml` is used when present and non-empty.
    fn replaying_dir(dir: &Path) -> Result<Self, String> {
        let http = CassetteReplayer::load(&dir.join("http.cassette.yaml"))?;
        let clock_path = dir.join("clock.cassette.yaml");
        let clock: Box<dyn Clock> = if clock_path.exists() {
            let cassette = CassetteReplayer::load(&clock_path)?;
            if cassette.has_port("clock") {
                Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette)))
            } else {
                Box::new(LiveClock)
            }
        } else {
            Box::new(LiveClock)
        };
        let transport = Box::new(ReplayingHttpTransport::new(CassetteReplayer::new(&http)));
        Ok(Self::new(clock, transport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::ports::transport::HttpRequest;
    use chrono::Utc;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette = Cassette {
            name: "ctx".into(),
            recorded_at: Utc::now(),
            service: "http://svc/api/tasks".into(),
            interactions,
        };
        std::fs::write(path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
    }

    fn http_interaction(seq: u64, body: &str) -> Interaction {
        Interaction {
            seq,
            port: "http".into(),
            method: "post_json".into(),
            endpoint: None,
            input: json!({}),
            output: json!({"Ok": {"status": 200, "status_text": "OK", "body": body}}),
        }
    }

    #[tokio::test]
    async fn replaying_context_serves_clock_and_http() {
        let dir = std::env::temp_dir().join("taskmatrix_ctx_replay_both");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("both.cassette.yaml");
        write_cassette(
            &path,
            vec![
                Interaction {
                    seq: 0,
                    port: "clock".into(),
                    method: "now".into(),
                    endpoint: None,
                    input: json!(null),
                    output: json!("2024-06-15T10:30:00Z"),
                },
                http_interaction(1, "{\"tasks\": []}"),
            ],
        );

        let ctx = ServiceContext::replaying(&path).unwrap();
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        let request = HttpRequest { url: "http://svc/api/tasks/analyze/".into(), body: json!([]) };
        let reply = ctx.transport.post_json(&request).await.unwrap();
        assert_eq!(reply.body, "{\"tasks\": []}");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn replaying_without_clock_uses_system_time() {
        let dir = std::env::temp_dir().join("taskmatrix_ctx_replay_http_only");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("http.cassette.yaml");
        write_cassette(&path, vec![http_interaction(0, "{}")]);

        let before = Utc::now();
        let ctx = ServiceContext::replaying(&path).unwrap();
        assert!(ctx.clock.now() >= before);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn replaying_directory_reads_per_port_cassettes() {
        let root = std::env::temp_dir().join("taskmatrix_ctx_replay_dir");
        let session = RecordingSession::at(&root, "http://svc/api/tasks").unwrap();
        session.clock.lock().unwrap().record(
            "clock",
            "now",
            json!(null),
            json!("2024-06-15T10:30:00Z"),
        );
        session.http.lock().unwrap().record(
            "http",
            "post_json",
            json!({}),
            json!({"Ok": {"status": 200, "status_text": "OK", "body": "{}"}}),
        );
        let dir = session.finish().unwrap();

        let ctx = ServiceContext::replaying(&dir).unwrap();
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        let request = HttpRequest { url: "http://svc/api/tasks/suggest/".into(), body: json!([]) };
        assert_eq!(ctx.transport.post_json(&request).await.unwrap().body, "{}");

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn replaying_directory_without_http_cassette_is_an_error() {
        let dir = std::env::temp_dir().join("taskmatrix_ctx_replay_empty_dir");
        std::fs::create_dir_all(&dir).unwrap();
        let err = ServiceContext::replaying(&dir).err().unwrap();
        assert!(err.contains("http.cassette.yaml"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn replaying_missing_cassette_is_an_error() {
        let result = ServiceContext::replaying(Path::new("/nonexistent/x.cassette.yaml"));
        assert!(result.is_err());
    }
}
