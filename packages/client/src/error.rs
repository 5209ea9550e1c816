//! Error types for the relaychat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The WebSocket handshake failed
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection dropped
    #[error("Connection lost")]
    ConnectionLost,

    /// Gave up after the configured number of attempts
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectLimitExceeded(u32),
}
