//! Server execution logic.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use relaychat_shared::codec::ChatMessage;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::{ConfigError, RelayConfig},
    domain::{ConnectionRegistry, HistoryRepository},
    infrastructure::{registry::WebSocketConnectionRegistry, repository::InMemoryHistoryRepository},
    usecase::{
        BroadcastEngine, ConnectSessionUseCase, DisconnectSessionUseCase, GetRelayStateUseCase,
        ResetHistoryUseCase, SendMessageUseCase,
    },
};

use super::{
    handler::{debug_history, health_check, websocket_handler},
    maintenance::spawn_history_maintenance,
    signal::shutdown_signal,
    state::AppState,
};

/// Process-level failures. Everything per-connection is handled below this level.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// WebSocket relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::in_memory(&RelayConfig::default()).await?;
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    connect_session_usecase: Arc<ConnectSessionUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    get_relay_state_usecase: Arc<GetRelayStateUseCase>,
    reset_history_usecase: Arc<ResetHistoryUseCase>,
    /// Period of the Maintenance Timer
    reset_interval: Duration,
}

impl Server {
    pub fn new(
        connect_session_usecase: Arc<ConnectSessionUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
        get_relay_state_usecase: Arc<GetRelayStateUseCase>,
        reset_history_usecase: Arc<ResetHistoryUseCase>,
        reset_interval: Duration,
    ) -> Self {
        Self {
            connect_session_usecase,
            send_message_usecase,
            disconnect_session_usecase,
            get_relay_state_usecase,
            reset_history_usecase,
            reset_interval,
        }
    }

    /// Wire a server backed by the in-memory history and the WebSocket registry.
    ///
    /// Initialization order:
    /// 1. Repository and Registry
    /// 2. BroadcastEngine (seeded with the banner, if any)
    /// 3. UseCases
    pub async fn in_memory(config: &RelayConfig) -> Result<Self, ServerError> {
        config.validate()?;

        // 1. Repository and Registry
        let history: Arc<dyn HistoryRepository> = Arc::new(InMemoryHistoryRepository::new());
        let registry: Arc<dyn ConnectionRegistry> = Arc::new(WebSocketConnectionRegistry::new());

        // 2. BroadcastEngine
        let engine = Arc::new(BroadcastEngine::new(history.clone(), registry.clone()));
        if let Some(banner) = &config.banner {
            engine.seed(&ChatMessage::system(banner.clone())).await;
            tracing::info!("Startup banner seeded into history");
        }

        // 3. UseCases
        Ok(Self::new(
            Arc::new(ConnectSessionUseCase::new(
                engine.clone(),
                config.queue_capacity,
            )),
            Arc::new(SendMessageUseCase::new(engine.clone())),
            Arc::new(DisconnectSessionUseCase::new(engine.clone())),
            Arc::new(GetRelayStateUseCase::new(history, registry)),
            Arc::new(ResetHistoryUseCase::new(engine)),
            config.reset_interval,
        ))
    }

    /// Build the HTTP router
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            connect_session_usecase: self.connect_session_usecase.clone(),
            send_message_usecase: self.send_message_usecase.clone(),
            disconnect_session_usecase: self.disconnect_session_usecase.clone(),
            get_relay_state_usecase: self.get_relay_state_usecase.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/debug/history", get(debug_history))
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    ///
    /// The Maintenance Timer runs for as long as the server does.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let maintenance =
            spawn_history_maintenance(self.reset_history_usecase.clone(), self.reset_interval);

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve);

        maintenance.abort();
        result
    }

    /// Run the relay server until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), ServerError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;

        match listener.local_addr() {
            Ok(addr) => tracing::info!("WebSocket relay listening on {}", addr),
            Err(e) => tracing::warn!("Could not read local address: {}", e),
        }
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
