//! Recording adapters that capture interactions to cassettes.

pub mod clock;
pub mod http;

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

pub use clock::RecordingClock;
pub use http::RecordingHttpTransport;

fn lock(recorder: &Arc<Mutex<CassetteRecorder>>) -> MutexGuard<'_, CassetteRecorder> {
    recorder.lock().expect("recorder lock poisoned")
}

/// Encode a `Result` as `{"Ok": v}` or `{"Err": e.to_string()}`.
///
/// Mirror of `replaying::replay_result`.
pub(crate) fn result_output<T, E>(result: &Result<T, E>) -> serde_json::Value
where
    T: Serialize,
    E: std::fmt::Display,
{
    match result {
        Ok(v) => serde_json::json!({ "Ok": serde_json::to_value(v).unwrap_or_default() }),
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    }
}
