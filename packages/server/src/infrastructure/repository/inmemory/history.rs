//! InMemory History Repository 実装
//!
//! ドメイン層が定義する HistoryRepository trait の具体的な実装。
//! プロセス再起動で履歴は失われます（永続化はしない）。

use async_trait::async_trait;
use relaychat_shared::codec::{self, ChatMessage};
use tokio::sync::Mutex;

use crate::domain::{EncodedMessage, HistoryRepository};

/// インメモリ History Repository 実装
#[derive(Default)]
pub struct InMemoryHistoryRepository {
    /// 到着順のエンコード済みメッセージ
    entries: Mutex<Vec<EncodedMessage>>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn append(&self, message: EncodedMessage) {
        let mut entries = self.entries.lock().await;
        entries.push(message);
    }

    async fn snapshot(&self) -> Vec<EncodedMessage> {
        let entries = self.entries.lock().await;
        entries.clone()
    }

    async fn reset(&self) -> ChatMessage {
        let notice = ChatMessage::history_cleared();
        let mut entries = self.entries.lock().await;
        let cleared = entries.len();
        entries.clear();
        entries.push(codec::encode(&notice).into());
        tracing::debug!("History reset, {} entries cleared", cleared);
        notice
    }

    async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn frame(text: &str) -> EncodedMessage {
        Arc::from(text)
    }

    #[tokio::test]
    async fn test_append_and_snapshot_preserve_order() {
        // テスト項目: 追加した順番どおりにスナップショットが返される
        // given (前提条件):
        let repository = InMemoryHistoryRepository::new();

        // when (操作):
        repository.append(frame("a")).await;
        repository.append(frame("b")).await;
        repository.append(frame("c")).await;

        // then (期待する結果):
        let snapshot = repository.snapshot().await;
        let texts: Vec<&str> = snapshot.iter().map(|m| m.as_ref()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(repository.len().await, 3);
    }

    #[tokio::test]
    async fn test_snapshot_is_a_copy() {
        // テスト項目: スナップショット取得後の追加はスナップショットに影響しない
        // given (前提条件):
        let repository = InMemoryHistoryRepository::new();
        repository.append(frame("a")).await;
        let snapshot = repository.snapshot().await;

        // when (操作):
        repository.append(frame("b")).await;

        // then (期待する結果):
        assert_eq!(snapshot.len(), 1);
        assert_eq!(repository.len().await, 2);
    }

    #[tokio::test]
    async fn test_reset_leaves_exactly_one_notice() {
        // テスト項目: reset 後は履歴クリア通知 1 件だけが残り、その通知が返される
        // given (前提条件):
        let repository = InMemoryHistoryRepository::new();
        repository
            .append(frame(r#"{"username":"alice","message":"hi"}"#))
            .await;
        repository
            .append(frame(r#"{"username":"bob","message":"yo"}"#))
            .await;

        // when (操作):
        let notice = repository.reset().await;

        // then (期待する結果):
        assert!(notice.is_system());
        assert_eq!(notice.text(), "Chat history cleared.");
        let snapshot = repository.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot[0].as_ref(),
            r#"{"system":true,"message":"Chat history cleared."}"#
        );
    }

    #[tokio::test]
    async fn test_reset_twice_does_not_accumulate_notices() {
        // テスト項目: 連続して reset しても通知は 1 件のまま
        // given (前提条件):
        let repository = InMemoryHistoryRepository::new();
        repository.reset().await;

        // when (操作):
        repository.reset().await;

        // then (期待する結果):
        assert_eq!(repository.len().await, 1);
    }
}
