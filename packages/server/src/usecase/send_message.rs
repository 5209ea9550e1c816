//! UseCase: メッセージ送信処理
//!
//! デコード済みのメッセージを `BroadcastEngine` に渡し、履歴への追加と全接続への配送を行います。
//! 個々の接続への配送失敗は呼び出し元には伝わりません。

use std::sync::Arc;

use relaychat_shared::codec::ChatMessage;

use super::{BroadcastEngine, BroadcastReport};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    engine: Arc<BroadcastEngine>,
}

impl SendMessageUseCase {
    pub fn new(engine: Arc<BroadcastEngine>) -> Self {
        Self { engine }
    }

    /// メッセージ送信を実行
    pub async fn execute(&self, message: ChatMessage) -> BroadcastReport {
        tracing::info!(
            "Broadcasting message from '{}': {}",
            message.username(),
            message.text()
        );
        self.engine.publish(&message).await
    }
}
