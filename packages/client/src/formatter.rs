//! Message formatting utilities for client display.

use relaychat_shared::{
    codec::{ChatMessage, MessageKind},
    time::format_clock_time,
};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a decoded frame
    ///
    /// # Arguments
    ///
    /// * `message` - The decoded chat message or system notice
    /// * `received_at` - Unix timestamp when the frame arrived (milliseconds)
    pub fn format_message(message: &ChatMessage, received_at: i64) -> String {
        match message.kind() {
            MessageKind::User => format!(
                "\n[{}] {}: {}\n",
                format_clock_time(received_at),
                message.username(),
                message.text()
            ),
            MessageKind::System => format!("\n*** {}\n", message.text()),
        }
    }

    /// Format a text frame that could not be decoded
    pub fn format_raw_message(text: &str) -> String {
        format!("\n[raw] {}\n", text)
    }

    /// Format a binary frame notice
    pub fn format_binary_message(len: usize) -> String {
        format!("\n[binary] {} bytes\n", len)
    }

    /// Format the banner shown once connected
    pub fn format_connected(url: &str, username: Option<&str>) -> String {
        let who = username.unwrap_or("Anonymous");
        format!(
            "\nConnected to {} as '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
            url, who
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_user_message() {
        // テスト項目: ユーザーメッセージは時刻・ユーザー名・本文で表示される
        // given (前提条件):
        let message = ChatMessage::user("alice", "hi");

        // when (操作):
        let formatted = MessageFormatter::format_message(&message, 1_700_000_000_000);

        // then (期待する結果):
        let expected = format!("\n[{}] alice: hi\n", format_clock_time(1_700_000_000_000));
        assert_eq!(formatted, expected);
    }

    #[test]
    fn test_format_system_notice() {
        // テスト項目: システム通知は *** 付きで表示される
        // given (前提条件):
        let message = ChatMessage::history_cleared();

        // when (操作):
        let formatted = MessageFormatter::format_message(&message, 0);

        // then (期待する結果):
        assert_eq!(formatted, "\n*** Chat history cleared.\n");
    }

    #[test]
    fn test_format_raw_and_binary() {
        // テスト項目: デコードできないフレームとバイナリフレームの表示
        // given (前提条件):
        let raw = "not json";

        // when (操作):
        let raw_formatted = MessageFormatter::format_raw_message(raw);
        let binary_formatted = MessageFormatter::format_binary_message(42);

        // then (期待する結果):
        assert_eq!(raw_formatted, "\n[raw] not json\n");
        assert_eq!(binary_formatted, "\n[binary] 42 bytes\n");
    }

    #[test]
    fn test_format_connected_defaults_to_anonymous() {
        // テスト項目: ユーザー名未指定のときは Anonymous と表示される
        // given (前提条件):
        let url = "ws://127.0.0.1:8080/ws";

        // when (操作):
        let formatted = MessageFormatter::format_connected(url, None);

        // then (期待する結果):
        assert!(formatted.contains("as 'Anonymous'"));
        assert!(formatted.contains(url));
    }
}
