//! Wire format for chat frames.
//!
//! Every WebSocket frame carries one UTF-8 JSON object:
//!
//! ```text
//! client → server : {"username"?: string, "message"?: string}
//! server → client : {"username": string, "message": string}
//!                   {"system": true, "message": string}
//! ```
//!
//! `encode` is deterministic, so a message replayed from history is byte-identical to the
//! frame that was originally broadcast.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Username used when a payload carries no (or an empty) `username`.
pub const DEFAULT_USERNAME: &str = "Anonymous";

/// Internal username of server-originated notices. Never written to the wire.
pub const SYSTEM_USERNAME: &str = "System";

/// Text of the notice seeded into history by every periodic reset.
pub const HISTORY_CLEARED_NOTICE: &str = "Chat history cleared.";

/// Who a message is attributable to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    User,
    System,
}

/// Canonical, immutable chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    username: String,
    text: String,
    kind: MessageKind,
}

impl ChatMessage {
    /// Create a user message. An empty username falls back to [`DEFAULT_USERNAME`].
    pub fn user(username: impl Into<String>, text: impl Into<String>) -> Self {
        let username = username.into();
        let username = if username.is_empty() {
            DEFAULT_USERNAME.to_string()
        } else {
            username
        };
        Self {
            username,
            text: text.into(),
            kind: MessageKind::User,
        }
    }

    /// Create a server-originated notice.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            username: SYSTEM_USERNAME.to_string(),
            text: text.into(),
            kind: MessageKind::System,
        }
    }

    /// The notice announcing a history reset.
    pub fn history_cleared() -> Self {
        Self::system(HISTORY_CLEARED_NOTICE)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn is_system(&self) -> bool {
        self.kind == MessageKind::System
    }
}

/// Errors produced while decoding an inbound payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Payload bytes are not valid UTF-8
    #[error("payload is not valid UTF-8")]
    InvalidUtf8,

    /// Payload is not a JSON object with the expected field types
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Field view of one frame. Both string fields accept `null` as absent.
#[derive(Debug, Deserialize)]
struct WireFrame {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    system: Option<bool>,
}

fn parse_frame(raw: &[u8]) -> Result<WireFrame, DecodeError> {
    let text = std::str::from_utf8(raw).map_err(|_| DecodeError::InvalidUtf8)?;
    // Parse as a map first: serde would otherwise accept a JSON array for a struct.
    let object: Map<String, Value> =
        serde_json::from_str(text).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    serde_json::from_value(Value::Object(object)).map_err(|e| DecodeError::Malformed(e.to_string()))
}

fn user_message(frame: WireFrame) -> ChatMessage {
    ChatMessage::user(frame.username.unwrap_or_default(), frame.message.unwrap_or_default())
}

/// Decode any frame, including server notices (`"system": true`).
///
/// `decode(encode(m).as_bytes()) == Ok(m)` holds for every `ChatMessage`.
pub fn decode(raw: &[u8]) -> Result<ChatMessage, DecodeError> {
    let frame = parse_frame(raw)?;
    if frame.system == Some(true) {
        return Ok(ChatMessage::system(frame.message.unwrap_or_default()));
    }
    Ok(user_message(frame))
}

/// Decode a payload received from a client.
///
/// The `system` key is ignored: clients can only ever produce user messages.
pub fn decode_inbound(raw: &[u8]) -> Result<ChatMessage, DecodeError> {
    parse_frame(raw).map(user_message)
}

/// Outbound user frame. Field order is the wire order.
#[derive(Debug, Serialize)]
struct UserFrame<'a> {
    username: &'a str,
    message: &'a str,
}

/// Outbound server notice
#[derive(Debug, Serialize)]
struct SystemFrame<'a> {
    system: bool,
    message: &'a str,
}

/// Encode a message into its canonical wire form.
pub fn encode(message: &ChatMessage) -> String {
    let encoded = match message.kind {
        MessageKind::User => serde_json::to_string(&UserFrame {
            username: &message.username,
            message: &message.text,
        }),
        MessageKind::System => serde_json::to_string(&SystemFrame {
            system: true,
            message: &message.text,
        }),
    };
    // Frames hold only strings and a bool, which always serialize.
    encoded.expect("chat frame serializes to JSON")
}
