//! Repository trait 定義
//!
//! ユースケース層が必要とする共有状態へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use relaychat_shared::codec::ChatMessage;

use super::{Connection, ConnectionId, EncodedMessage};

/// History Buffer
///
/// Ordered, append-only between resets. `reset` is the only eviction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Append one encoded message at the end
    async fn append(&self, message: EncodedMessage);

    /// Copy of all entries in arrival order
    async fn snapshot(&self) -> Vec<EncodedMessage>;

    /// Clear every entry, seed the reset notice and return it
    async fn reset(&self) -> ChatMessage;

    async fn len(&self) -> usize;
}

/// Connection Registry
///
/// Membership is keyed by `ConnectionId`. Iteration always happens over a copy so that
/// concurrent `add`/`remove` are never an error.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    async fn add(&self, connection: Connection);

    /// Remove a member. Removing an absent id is a no-op that returns `false`.
    async fn remove(&self, id: &ConnectionId) -> bool;

    /// Copy of the current members
    async fn snapshot(&self) -> Vec<Connection>;

    async fn len(&self) -> usize;

    /// Apply `f` to every member of a snapshot taken at call time
    async fn for_each(&self, f: &mut (dyn for<'c> FnMut(&'c Connection) + Send)) {
        for connection in self.snapshot().await {
            f(&connection);
        }
    }
}
