//! Recording adapter for the `Clock` port.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use super::lock;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::Clock;

/// Records every timestamp handed out by the wrapped clock.
///
/// Instants are cut to whole milliseconds before they are recorded and
/// returned, so toast and hint deadlines computed during recording match
/// the replay exactly and the cassette stays readable.
pub struct RecordingClock {
    inner: Box<dyn Clock>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingClock {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn Clock>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl Clock for RecordingClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.inner.now().trunc_subsecs(3);
        let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        lock(&self.recorder).record("clock", "now", serde_json::Value::Null, stamp.into());
        now
    }
}
