//! HTTP and WebSocket handlers.

mod http;
mod websocket;

pub use http::{debug_history, health_check};
pub use websocket::{HandshakeError, websocket_handler};
