//! Server state

use std::sync::Arc;

use crate::usecase::{
    ConnectSessionUseCase, DisconnectSessionUseCase, GetRelayStateUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectSessionUseCase（接続と履歴 replay の準備）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// SendMessageUseCase（メッセージのブロードキャスト）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// DisconnectSessionUseCase（切断時の後始末）
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// GetRelayStateUseCase（デバッグ用の状態取得）
    pub get_relay_state_usecase: Arc<GetRelayStateUseCase>,
}
