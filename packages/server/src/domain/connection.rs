//! Connection handle
//!
//! A `Connection` is the registry-side half of one attached client: its id and the sending
//! end of a bounded outbox. The session owns the receiving end (`Outbox`) and forwards what
//! arrives there to the socket.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};

use super::{ConnectionId, DeliveryError, Timestamp};

/// Canonical wire form of one message, shared between history and every outbox.
pub type EncodedMessage = Arc<str>;

/// Receiving end of a connection's outbox
pub type Outbox = mpsc::Receiver<EncodedMessage>;

/// Handle to one live connection
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    connected_at: Timestamp,
    outbox: mpsc::Sender<EncodedMessage>,
}

impl Connection {
    /// Open a connection with an outbox holding at most `capacity` undelivered frames.
    ///
    /// A capacity of zero is raised to one.
    pub fn open(connected_at: Timestamp, capacity: usize) -> (Self, Outbox) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let connection = Self {
            id: ConnectionId::generate(),
            connected_at,
            outbox: tx,
        };
        (connection, rx)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn connected_at(&self) -> Timestamp {
        self.connected_at
    }

    /// Queue a frame without waiting.
    pub fn try_deliver(&self, frame: &EncodedMessage) -> Result<(), DeliveryError> {
        self.outbox
            .try_send(Arc::clone(frame))
            .map_err(|e| match e {
                TrySendError::Full(_) => DeliveryError::OutboxFull {
                    capacity: self.outbox.max_capacity(),
                },
                TrySendError::Closed(_) => DeliveryError::OutboxClosed,
            })
    }

    pub fn is_closed(&self) -> bool {
        self.outbox.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(text: &str) -> EncodedMessage {
        Arc::from(text)
    }

    #[tokio::test]
    async fn test_try_deliver_queues_in_order() {
        // テスト項目: 配送したフレームが順番どおりに outbox から取り出せる
        // given (前提条件):
        let (connection, mut outbox) = Connection::open(Timestamp::new(0), 4);

        // when (操作):
        connection.try_deliver(&frame("one")).unwrap();
        connection.try_deliver(&frame("two")).unwrap();

        // then (期待する結果):
        assert_eq!(outbox.recv().await.as_deref(), Some("one"));
        assert_eq!(outbox.recv().await.as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn test_try_deliver_full_outbox() {
        // テスト項目: outbox が満杯のとき OutboxFull が返される
        // given (前提条件):
        let (connection, _outbox) = Connection::open(Timestamp::new(0), 1);
        connection.try_deliver(&frame("first")).unwrap();

        // when (操作):
        let result = connection.try_deliver(&frame("second"));

        // then (期待する結果):
        assert_eq!(result, Err(DeliveryError::OutboxFull { capacity: 1 }));
    }

    #[tokio::test]
    async fn test_try_deliver_closed_outbox() {
        // テスト項目: 受信側が破棄された後の配送は OutboxClosed になる
        // given (前提条件):
        let (connection, outbox) = Connection::open(Timestamp::new(0), 1);
        drop(outbox);

        // when (操作):
        let result = connection.try_deliver(&frame("late"));

        // then (期待する結果):
        assert!(connection.is_closed());
        assert_eq!(result, Err(DeliveryError::OutboxClosed));
    }

    #[test]
    fn test_open_zero_capacity_is_raised_to_one() {
        // テスト項目: 容量 0 を指定しても 1 件は保持できる
        // given (前提条件):
        let (connection, _outbox) = Connection::open(Timestamp::new(0), 0);

        // when (操作):
        let result = connection.try_deliver(&frame("only"));

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
