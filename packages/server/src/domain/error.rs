//! Domain errors

use thiserror::Error;

/// Failure to hand a frame to one connection's outbox.
///
/// Recovered by the broadcast engine: the connection is dropped from the registry and the
/// other recipients are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The connection fell too far behind
    #[error("outbox is full (capacity {capacity})")]
    OutboxFull { capacity: usize },

    /// The session's writer is gone
    #[error("outbox is closed")]
    OutboxClosed,
}
