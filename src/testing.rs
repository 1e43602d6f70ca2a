//! Test helpers shared by unit tests.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::adapters::live::clock::FixedClock;
use crate::adapters::replaying::ReplayingHttpTransport;
use crate::cassette::format::{Cassette, Interaction};
use crate::cassette::replayer::CassetteReplayer;
use crate::context::ServiceContext;

/// A fixed instant: 2025-03-10 09:30 UTC.
pub(crate) fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap()
}

/// A recorded 2xx-or-not reply whose body is `body` serialized as JSON.
pub(crate) fn reply(status: u16, body: &Value) -> Value {
    json!({"Ok": {"status": status, "status_text": "OK", "body": body.to_string()}})
}

/// A recorded transport failure.
pub(crate) fn transport_failure(message: &str) -> Value {
    json!({"Err": message})
}

/// A context with a fixed clock whose transport serves `outputs` in order.
pub(crate) fn replay_context(outputs: Vec<Value>) -> ServiceContext {
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
        name: "test".into(),
        recorded_at: test_now(),
        service: "http://svc/api/tasks".into(),
        interactions,
    };
    ServiceContext::new(
        Box::new(FixedClock(test_now())),
        Box::new(ReplayingHttpTransport::new(CassetteReplayer::new(&cassette))),
    )
}
