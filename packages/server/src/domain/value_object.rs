//! Value objects

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Opaque identity of one attached connection.
///
/// There are no user accounts: two tabs of the same user are two connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh random (v4) id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_generate_is_unique() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given (前提条件):
        let first = ConnectionId::generate();

        // when (操作):
        let second = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }

    #[test]
    fn test_connection_id_display_matches_uuid() {
        // テスト項目: Display は内部の UUID 表現と一致する
        // given (前提条件):
        let id = ConnectionId::generate();

        // when (操作):
        let displayed = id.to_string();

        // then (期待する結果):
        assert_eq!(displayed, id.as_uuid().to_string());
    }

    #[test]
    fn test_timestamp_ordering() {
        // テスト項目: Timestamp は値の大小で比較できる
        // given (前提条件):
        let earlier = Timestamp::new(1000);
        let later = Timestamp::new(2000);

        // when (操作):
        // then (期待する結果):
        assert!(earlier < later);
        assert_eq!(later.value(), 2000);
    }
}
