//! Data Transfer Objects
//!
//! - `http`: HTTP API のレスポンスボディ
//!
//! WebSocket のフレーム形式は `relaychat_shared::codec` が定義します。

pub mod http;
