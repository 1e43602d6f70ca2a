//! Replaying adapters that serve recorded interactions back in order.

pub mod clock;
pub mod http;

use std::error::Error;
use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::format::Interaction;
use crate::cassette::replayer::CassetteReplayer;

pub use clock::ReplayingClock;
pub use http::ReplayingHttpTransport;

/// Take the next recorded interaction for `port::method`.
///
/// # Panics
///
/// Panics when the cassette has no further interaction for the pair.
pub(crate) fn next_recorded(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Interaction {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).clone()
}

/// Take the next recorded output for `port::method`.
///
/// # Panics
///
/// Panics when the cassette has no further interaction for the pair.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    next_recorded(replayer, port, method).output
}

/// Decode an output recorded with the `{"Ok": v}` / `{"Err": msg}`
/// convention. Lower-case `ok`/`err` keys are accepted too.
///
/// # Panics
///
/// Panics when the output matches neither shape or `v` does not decode.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, Box<dyn Error + Send + Sync>> {
    let ok = output.get("Ok").or_else(|| output.get("ok"));
    let err = output.get("Err").or_else(|| output.get("err"));
    match (ok, err) {
        (Some(value), _) => Ok(serde_json::from_value(value.clone())
            .unwrap_or_else(|e| panic!("recorded Ok value does not decode: {e}"))),
        (None, Some(message)) => {
            Err(message.as_str().map_or_else(|| message.to_string(), String::from).into())
        }
        (None, None) => panic!("recorded output is neither Ok nor Err: {output}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_ok_and_err() {
        let ok: Result<u16, _> = replay_result(json!({"Ok": 204}));
        assert_eq!(ok.unwrap(), 204);
        let err: Result<u16, _> = replay_result(json!({"err": "connection refused"}));
        assert_eq!(err.unwrap_err().to_string(), "connection refused");
    }

    #[test]
    #[should_panic(expected = "neither Ok nor Err")]
    fn rejects_untagged_output() {
        let _: Result<u16, _> = replay_result(json!(12));
    }
}
