//! Connection Registry の実装
//!
//! - `websocket`: WebSocket セッションの outbox を管理する実装

pub mod websocket;

pub use websocket::WebSocketConnectionRegistry;
