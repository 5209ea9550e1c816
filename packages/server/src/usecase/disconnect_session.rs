//! UseCase: セッション切断処理

use std::sync::Arc;

use crate::domain::ConnectionId;

use super::BroadcastEngine;

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    engine: Arc<BroadcastEngine>,
}

impl DisconnectSessionUseCase {
    pub fn new(engine: Arc<BroadcastEngine>) -> Self {
        Self { engine }
    }

    /// 接続を registry から削除する
    ///
    /// 配送失敗で既に削除されていた場合は `false` を返す（エラーではない）。
    pub async fn execute(&self, connection_id: ConnectionId) -> bool {
        let removed = self.engine.detach(&connection_id).await;
        if removed {
            tracing::info!("Connection '{}' removed from registry", connection_id);
        } else {
            tracing::debug!("Connection '{}' was already removed", connection_id);
        }
        removed
    }
}
