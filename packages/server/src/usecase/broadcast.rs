//! Broadcast Engine
//!
//! Owns the ordering guarantees of the relay:
//!
//! - every attached connection receives published messages in publish order
//! - a connection attaching concurrently with a publish sees that message exactly once,
//!   either in its replay snapshot or in its outbox
//!
//! Both follow from the `gate`: publish (append + fan-out), attach (register + snapshot)
//! and reset (clear + announce) never interleave.
//!
//! Delivery is a non-blocking `try_send` into each connection's bounded outbox. A full or
//! closed outbox drops the connection from the registry (disconnect-on-overflow) and never
//! reaches the publisher.

use std::sync::Arc;

use relaychat_shared::codec::{self, ChatMessage};
use tokio::sync::Mutex;

use crate::domain::{
    Connection, ConnectionId, ConnectionRegistry, DeliveryError, EncodedMessage,
    HistoryRepository,
};

/// Outcome of one fan-out round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections whose outbox accepted the frame
    pub delivered: usize,
    /// Connections removed because delivery failed
    pub dropped: Vec<ConnectionId>,
}

pub struct BroadcastEngine {
    history: Arc<dyn HistoryRepository>,
    registry: Arc<dyn ConnectionRegistry>,
    gate: Mutex<()>,
}

impl BroadcastEngine {
    pub fn new(history: Arc<dyn HistoryRepository>, registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self {
            history,
            registry,
            gate: Mutex::new(()),
        }
    }

    /// Append `message` to history and deliver it to every attached connection.
    pub async fn publish(&self, message: &ChatMessage) -> BroadcastReport {
        let frame: EncodedMessage = codec::encode(message).into();
        let _gate = self.gate.lock().await;
        self.history.append(Arc::clone(&frame)).await;
        self.deliver(&frame).await
    }

    /// Deliver `message` to every attached connection without touching history.
    pub async fn announce(&self, message: &ChatMessage) -> BroadcastReport {
        let frame: EncodedMessage = codec::encode(message).into();
        let _gate = self.gate.lock().await;
        self.deliver(&frame).await
    }

    /// Append `message` to history without delivering it (startup banner).
    pub async fn seed(&self, message: &ChatMessage) {
        let frame: EncodedMessage = codec::encode(message).into();
        let _gate = self.gate.lock().await;
        self.history.append(frame).await;
    }

    /// Register `connection` and return the history it must replay before live traffic.
    pub async fn attach(&self, connection: Connection) -> Vec<EncodedMessage> {
        let _gate = self.gate.lock().await;
        tracing::debug!(
            "Registering connection '{}' (connected at {})",
            connection.id(),
            connection.connected_at().value()
        );
        self.registry.add(connection).await;
        self.history.snapshot().await
    }

    /// Number of entries a newcomer would replay right now
    pub async fn history_len(&self) -> usize {
        self.history.len().await
    }

    /// Remove a connection. Idempotent.
    pub async fn detach(&self, id: &ConnectionId) -> bool {
        self.registry.remove(id).await
    }

    /// Clear history and announce the seeded notice to current connections.
    ///
    /// The notice is already in history after `reset`, so it is delivered but not appended.
    pub async fn reset_history(&self) -> (ChatMessage, BroadcastReport) {
        let _gate = self.gate.lock().await;
        let notice = self.history.reset().await;
        let frame: EncodedMessage = codec::encode(&notice).into();
        let report = self.deliver(&frame).await;
        (notice, report)
    }

    async fn deliver(&self, frame: &EncodedMessage) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        let mut failures: Vec<(ConnectionId, DeliveryError)> = Vec::new();

        self.registry
            .for_each(&mut |connection: &Connection| match connection.try_deliver(frame) {
                Ok(()) => report.delivered += 1,
                Err(e) => failures.push((connection.id(), e)),
            })
            .await;

        for (id, error) in failures {
            tracing::warn!("Failed to deliver to connection '{}': {}, dropping it", id, error);
            self.registry.remove(&id).await;
            report.dropped.push(id);
        }

        tracing::debug!(
            "Delivered frame to {} connection(s), dropped {}",
            report.delivered,
            report.dropped.len()
        );
        report
    }
}
