//! UseCase 層
//!
//! `BroadcastEngine` が履歴と接続レジストリの一貫性を保証し、
//! 各ユースケースはその上に薄く乗ります。

pub mod broadcast;
pub mod connect_session;
pub mod disconnect_session;
pub mod get_relay_state;
pub mod reset_history;
pub mod send_message;

pub use broadcast::{BroadcastEngine, BroadcastReport};
pub use connect_session::{AttachedSession, ConnectSessionUseCase};
pub use disconnect_session::DisconnectSessionUseCase;
pub use get_relay_state::{GetRelayStateUseCase, RelayState};
pub use reset_history::{ResetHistoryUseCase, ResetOutcome};
pub use send_message::SendMessageUseCase;
