//! Adapter implementations for the port traits.
//!
//! - `live`: real clock and HTTP.
//! - `recording`: wrap a live adapter and capture traffic to a cassette.
//! - `replaying`: serve captured traffic back without a network.

pub mod live;
pub mod recording;
pub mod replaying;
