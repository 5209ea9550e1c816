//! Maintenance Timer
//!
//! Background task that resets history on a fixed period. The first reset happens one full
//! period after start. It never reads inbound traffic.

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::usecase::ResetHistoryUseCase;

/// Spawn the maintenance loop. Abort the returned handle to stop it.
///
/// A period too large to schedule ends the task immediately.
pub fn spawn_history_maintenance(
    usecase: Arc<ResetHistoryUseCase>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let Some(start) = Instant::now().checked_add(period) else {
            tracing::error!(
                "History maintenance period {:?} is out of range, not scheduled",
                period
            );
            return;
        };
        let mut interval = tokio::time::interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!("History maintenance scheduled every {:?}", period);

        loop {
            interval.tick().await;
            let outcome = usecase.execute().await;
            if !outcome.report.dropped.is_empty() {
                tracing::warn!(
                    "{} connection(s) dropped while announcing history reset",
                    outcome.report.dropped.len()
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Connection, HistoryRepository, Timestamp},
        infrastructure::{
            registry::WebSocketConnectionRegistry, repository::InMemoryHistoryRepository,
        },
        usecase::BroadcastEngine,
    };
    use relaychat_shared::codec::ChatMessage;

    #[tokio::test(start_paused = true)]
    async fn test_maintenance_resets_on_each_period() {
        // テスト項目: 周期ごとに履歴がリセットされ、接続中のクライアントに通知が 1 回ずつ届く
        // given (前提条件):
        let history = Arc::new(InMemoryHistoryRepository::new());
        let engine = Arc::new(BroadcastEngine::new(
            history.clone(),
            Arc::new(WebSocketConnectionRegistry::new()),
        ));
        let (connection, mut outbox) = Connection::open(Timestamp::new(0), 8);
        engine.attach(connection).await;
        engine.publish(&ChatMessage::user("alice", "hi")).await;
        assert_eq!(outbox.recv().await.as_deref(), Some(r#"{"username":"alice","message":"hi"}"#));

        let period = Duration::from_secs(3600);
        let handle = spawn_history_maintenance(Arc::new(ResetHistoryUseCase::new(engine)), period);

        // when (操作): 1 周期より少し前
        tokio::time::sleep(period - Duration::from_secs(1)).await;

        // then (期待する結果): まだリセットされていない
        assert!(outbox.try_recv().is_err());
        assert_eq!(history.len().await, 1);

        // when (操作): 1 周期経過
        tokio::time::sleep(Duration::from_secs(2)).await;

        // then (期待する結果):
        let notice = r#"{"system":true,"message":"Chat history cleared."}"#;
        assert_eq!(outbox.recv().await.as_deref(), Some(notice));
        assert!(outbox.try_recv().is_err());
        assert_eq!(history.snapshot().await.len(), 1);

        // when (操作): もう 1 周期経過
        tokio::time::sleep(period).await;

        // then (期待する結果): 2 回目の通知が届き、履歴は通知 1 件のまま
        assert_eq!(outbox.recv().await.as_deref(), Some(notice));
        assert_eq!(history.len().await, 1);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_unschedulable_period_ends_without_panic() {
        // テスト項目: スケジュールできない周期を渡してもタスクは panic せずに終了する
        // given (前提条件):
        let engine = Arc::new(BroadcastEngine::new(
            Arc::new(InMemoryHistoryRepository::new()),
            Arc::new(WebSocketConnectionRegistry::new()),
        ));

        // when (操作):
        let handle = spawn_history_maintenance(
            Arc::new(ResetHistoryUseCase::new(engine)),
            Duration::MAX,
        );

        // then (期待する結果):
        assert!(handle.await.is_ok());
    }
}
