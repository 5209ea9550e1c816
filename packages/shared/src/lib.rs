//! Shared building blocks for the relaychat server and client.
//!
//! - `codec`: the wire format exchanged over the WebSocket channel
//! - `logger`: tracing subscriber setup used by both binaries
//! - `time`: clock abstraction and timestamp formatting

pub mod codec;
pub mod logger;
pub mod time;
