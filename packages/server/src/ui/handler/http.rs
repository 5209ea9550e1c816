//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{HealthDto, RelayStateDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto { status: "ok" })
}

/// Debug endpoint exposing the connection count and current history (read-only)
pub async fn debug_history(State(state): State<Arc<AppState>>) -> Json<RelayStateDto> {
    let relay_state = state.get_relay_state_usecase.execute().await;
    Json(RelayStateDto::new(relay_state.connections, &relay_state.history))
}
