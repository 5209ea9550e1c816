//! HTTP API DTOs

use serde::Serialize;
use serde_json::Value;

use crate::domain::EncodedMessage;

/// Response body of `GET /debug/history`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelayStateDto {
    /// Number of attached connections
    pub connections: usize,
    /// History entries in replay order, as their wire JSON
    pub history: Vec<Value>,
}

impl RelayStateDto {
    pub fn new(connections: usize, history: &[EncodedMessage]) -> Self {
        let history = history
            .iter()
            .filter_map(|entry| match serde_json::from_str(entry) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("Skipping undecodable history entry: {}", e);
                    None
                }
            })
            .collect();
        Self {
            connections,
            history,
        }
    }
}

/// Response body of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
}
