//! WebSocket relay server implementation.

mod handler;
mod maintenance;
mod server;
mod signal;
pub mod state;

pub use handler::HandshakeError;
pub use maintenance::spawn_history_maintenance;
pub use server::{Server, ServerError};
