//! UseCase: リレー状態の取得（デバッグ用、読み取り専用）

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, EncodedMessage, HistoryRepository};

#[derive(Debug, Clone)]
pub struct RelayState {
    pub connections: usize,
    pub history: Vec<EncodedMessage>,
}

pub struct GetRelayStateUseCase {
    history: Arc<dyn HistoryRepository>,
    registry: Arc<dyn ConnectionRegistry>,
}

impl GetRelayStateUseCase {
    pub fn new(history: Arc<dyn HistoryRepository>, registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { history, registry }
    }

    pub async fn execute(&self) -> RelayState {
        RelayState {
            connections: self.registry.len().await,
            history: self.history.snapshot().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Connection, Timestamp},
        infrastructure::{
            registry::WebSocketConnectionRegistry, repository::InMemoryHistoryRepository,
        },
    };

    #[tokio::test]
    async fn test_get_relay_state() {
        // テスト項目: 接続数と履歴のスナップショットが取得できる
        // given (前提条件):
        let history = Arc::new(InMemoryHistoryRepository::new());
        let registry = Arc::new(WebSocketConnectionRegistry::new());
        history.append(Arc::from(r#"{"username":"a","message":"b"}"#)).await;
        let (connection, _outbox) = Connection::open(Timestamp::new(0), 4);
        registry.add(connection).await;
        let usecase = GetRelayStateUseCase::new(history, registry);

        // when (操作):
        let state = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(state.connections, 1);
        assert_eq!(state.history.len(), 1);
    }
}
