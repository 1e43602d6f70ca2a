//! Port traits defining external boundaries.
//!
//! Each trait is a boundary between the client and something outside it
//! (time, the analysis service). Implementations live in `src/adapters/`.

pub mod clock;
pub mod transport;

pub use clock::Clock;
pub use transport::{HttpReply, HttpRequest, HttpTransport, TransportError, TransportFuture};
