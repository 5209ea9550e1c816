//! WebSocket セッションを管理する ConnectionRegistry 実装
//!
//! ## 責務
//!
//! - 接続中の `Connection`（outbox の送信側）を保持
//! - 登録・削除・スナップショットの提供
//!
//! ## 設計ノート
//!
//! WebSocket の生成と outbox の受信側は UI 層（`ui/handler/websocket.rs`）が持ちます。
//! Registry から `Connection` が削除されると送信側が drop され、セッションの writer は
//! キューに残ったフレームを送り切った後に終了します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionId, ConnectionRegistry};

#[derive(Default)]
pub struct WebSocketConnectionRegistry {
    /// Key: ConnectionId, Value: Connection
    connections: Mutex<HashMap<ConnectionId, Connection>>,
}

impl WebSocketConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for WebSocketConnectionRegistry {
    async fn add(&self, connection: Connection) {
        let id = connection.id();
        let mut connections = self.connections.lock().await;
        connections.insert(id, connection);
        tracing::debug!(
            "Connection '{}' registered ({} attached)",
            id,
            connections.len()
        );
    }

    async fn remove(&self, id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        let removed = connections.remove(id).is_some();
        if removed {
            tracing::debug!(
                "Connection '{}' unregistered ({} attached)",
                id,
                connections.len()
            );
        }
        removed
    }

    async fn snapshot(&self) -> Vec<Connection> {
        let connections = self.connections.lock().await;
        connections.values().cloned().collect()
    }

    async fn len(&self) -> usize {
        self.connections.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{EncodedMessage, Timestamp};

    fn open() -> (Connection, crate::domain::Outbox) {
        Connection::open(Timestamp::new(0), 8)
    }

    #[tokio::test]
    async fn test_add_and_snapshot() {
        // テスト項目: 登録した接続がスナップショットに含まれる
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let (alice, _alice_rx) = open();
        let (bob, _bob_rx) = open();

        // when (操作):
        registry.add(alice.clone()).await;
        registry.add(bob.clone()).await;

        // then (期待する結果):
        let ids: Vec<ConnectionId> = registry.snapshot().await.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&alice.id()));
        assert!(ids.contains(&bob.id()));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        // テスト項目: 既に削除された接続を再度削除してもエラーにならない
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let (alice, _rx) = open();
        registry.add(alice.clone()).await;

        // when (操作):
        let first = registry.remove(&alice.id()).await;
        let second = registry.remove(&alice.id()).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_noop() {
        // テスト項目: 登録されていない ID の削除は他の接続に影響しない
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let (alice, _rx) = open();
        registry.add(alice).await;

        // when (操作):
        let removed = registry.remove(&ConnectionId::generate()).await;

        // then (期待する結果):
        assert!(!removed);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_for_each_visits_every_member() {
        // テスト項目: for_each で全ての接続にフレームを配送できる
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let (alice, mut alice_rx) = open();
        let (bob, mut bob_rx) = open();
        registry.add(alice).await;
        registry.add(bob).await;
        let frame: EncodedMessage = Arc::from("hello");

        // when (操作):
        let mut visited = 0;
        registry
            .for_each(&mut |connection: &Connection| {
                connection.try_deliver(&frame).unwrap();
                visited += 1;
            })
            .await;

        // then (期待する結果):
        assert_eq!(visited, 2);
        assert_eq!(alice_rx.recv().await.as_deref(), Some("hello"));
        assert_eq!(bob_rx.recv().await.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_for_each_through_trait_object_collects_ids() {
        // テスト項目: dyn ConnectionRegistry 経由の for_each で、各接続の借用からクロージャ外の状態を更新できる
        // given (前提条件):
        let registry: Arc<dyn ConnectionRegistry> = Arc::new(WebSocketConnectionRegistry::new());
        let (alice, _alice_rx) = open();
        let (bob, bob_rx) = open();
        let alice_id = alice.id();
        let bob_id = bob.id();
        registry.add(alice).await;
        registry.add(bob).await;
        drop(bob_rx);
        let frame: EncodedMessage = Arc::from("hello");

        // when (操作):
        let mut delivered = Vec::new();
        let mut failed = Vec::new();
        registry
            .for_each(&mut |connection: &Connection| match connection.try_deliver(&frame) {
                Ok(()) => delivered.push(connection.id()),
                Err(_) => failed.push(connection.id()),
            })
            .await;

        // then (期待する結果):
        assert_eq!(delivered, vec![alice_id]);
        assert_eq!(failed, vec![bob_id]);
    }

    #[tokio::test]
    async fn test_snapshot_survives_concurrent_removal() {
        // テスト項目: スナップショット取得後に接続が削除されても反復はエラーにならない
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let (alice, _rx) = open();
        registry.add(alice.clone()).await;
        let snapshot = registry.snapshot().await;

        // when (操作):
        registry.remove(&alice.id()).await;

        // then (期待する結果):
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id(), alice.id());
        assert_eq!(registry.len().await, 0);
    }
}
