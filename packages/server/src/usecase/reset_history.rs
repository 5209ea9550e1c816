//! UseCase: 履歴の定期リセット
//!
//! Maintenance Timer から呼ばれます。通知は履歴に seed 済みなので、
//! 接続中のクライアントへの配送だけを行います。

use std::sync::Arc;

use relaychat_shared::codec::ChatMessage;

use super::{BroadcastEngine, BroadcastReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetOutcome {
    pub notice: ChatMessage,
    pub report: BroadcastReport,
}

/// 履歴リセットのユースケース
pub struct ResetHistoryUseCase {
    engine: Arc<BroadcastEngine>,
}

impl ResetHistoryUseCase {
    pub fn new(engine: Arc<BroadcastEngine>) -> Self {
        Self { engine }
    }

    pub async fn execute(&self) -> ResetOutcome {
        let (notice, report) = self.engine.reset_history().await;
        tracing::info!(
            "{} (announced to {} connection(s))",
            notice.text(),
            report.delivered
        );
        ResetOutcome { notice, report }
    }
}
