//! Collects interactions and writes them out as a cassette file.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::format::{Cassette, Interaction};

/// Accumulates interactions for one cassette file.
///
/// HTTP interactions are tagged with their endpoint relative to the
/// service base, so a cassette reads as `analyze/?strategy=smart` rather
/// than a list of absolute URLs.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    service: String,
    started_at: DateTime<Utc>,
    interactions: Vec<Interaction>,
    next_seq: u64,
}

impl CassetteRecorder {
    /// Create a recorder that will write to `path`.
    ///
    /// `service` is the API base in effect; it is stored in the cassette
    /// and used to shorten recorded request URLs.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            service: service.into().trim_end_matches('/').to_string(),
            started_at: Utc::now(),
            interactions: Vec::new(),
            next_seq: 0,
        }
    }

    /// Append an interaction with no endpoint; `seq` is assigned here.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        self.push(port.into(), method.into(), None, input, output);
    }

    /// Append an `http::post_json` interaction for a request to `url`.
    pub fn record_request(&mut self, url: &str, input: serde_json::Value, output: serde_json::Value) {
        let endpoint = self.endpoint_for(url);
        self.push("http".into(), "post_json".into(), Some(endpoint), input, output);
    }

    /// `url` relative to the service base, or `url` itself when it lies
    /// outside the base.
    #[must_use]
    pub fn endpoint_for(&self, url: &str) -> String {
        match url.strip_prefix(self.service.as_str()) {
            Some(rest) if !self.service.is_empty() => rest.trim_start_matches('/').to_string(),
            _ => url.to_string(),
        }
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Write the cassette as YAML and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: self.started_at,
            service: self.service,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }

    fn push(
        &mut self,
        port: String,
        method: String,
        endpoint: Option<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        self.interactions.push(Interaction { seq: self.next_seq, port, method, endpoint, input, output });
        self.next_seq += 1;
    }
}
