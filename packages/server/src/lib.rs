//! Real-time chat relay library.
//!
//! Clients attach over WebSocket, receive the buffered history, and then every message
//! published by any attached client.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
