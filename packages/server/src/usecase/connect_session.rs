//! UseCase: セッション接続処理
//!
//! outbox を作成し、接続を登録し、replay すべき履歴を返します。
//! 登録とスナップショットは `BroadcastEngine::attach` で不可分に行われるため、
//! 並行して publish されたメッセージは replay か outbox のどちらか一方にだけ現れます。

use std::sync::Arc;

use relaychat_shared::time::{Clock, SystemClock};

use crate::domain::{Connection, ConnectionId, EncodedMessage, Outbox, Timestamp};

use super::BroadcastEngine;

/// A freshly registered connection, as seen by its session
#[derive(Debug)]
pub struct AttachedSession {
    pub connection_id: ConnectionId,
    pub connected_at: Timestamp,
    /// Live frames published after attachment
    pub outbox: Outbox,
    /// History to send before anything from `outbox`
    pub replay: Vec<EncodedMessage>,
}

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    engine: Arc<BroadcastEngine>,
    /// 接続ごとの outbox の容量
    queue_capacity: usize,
    clock: Arc<dyn Clock>,
}

impl ConnectSessionUseCase {
    pub fn new(engine: Arc<BroadcastEngine>, queue_capacity: usize) -> Self {
        Self::with_clock(engine, queue_capacity, Arc::new(SystemClock))
    }

    pub fn with_clock(
        engine: Arc<BroadcastEngine>,
        queue_capacity: usize,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            engine,
            queue_capacity,
            clock,
        }
    }

    /// 接続を登録し、replay する履歴と outbox を返す
    ///
    /// replay をソケットへ書いている間に届いた live フレームは outbox に溜まるため、
    /// outbox の容量は `queue_capacity` に現在の履歴件数を足したものになる。
    pub async fn execute(&self) -> AttachedSession {
        let connected_at = Timestamp::new(self.clock.now_millis());
        let headroom = self.engine.history_len().await;
        let capacity = self.queue_capacity.saturating_add(headroom);
        let (connection, outbox) = Connection::open(connected_at, capacity);
        let connection_id = connection.id();
        let replay = self.engine.attach(connection).await;

        AttachedSession {
            connection_id,
            connected_at,
            outbox,
            replay,
        }
    }
}
