//! Cassettes: YAML recordings of port traffic that can be replayed later.

pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
