//! Cassette data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded call on a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number, assigned by the recorder.
    pub seq: u64,
    /// Port name (`"clock"` or `"http"`).
    pub port: String,
    /// Method invoked on the port.
    pub method: String,
    /// HTTP endpoint relative to the cassette's service base, e.g.
    /// `analyze/?strategy=smart`. Absent for clock reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Input passed to the port.
    pub input: serde_json::Value,
    /// Output the port returned.
    pub output: serde_json::Value,
}

/// A named, ordered list of interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name.
    pub name: String,
    /// When the recording was made.
    pub recorded_at: DateTime<Utc>,
    /// Service base URL in effect while recording.
    #[serde(default)]
    pub service: String,
    /// Interactions in call order.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Whether any interaction was recorded for `port`.
    #[must_use]
    pub fn has_port(&self, port: &str) -> bool {
        self.interactions.iter().any(|i| i.port == port)
    }
}
