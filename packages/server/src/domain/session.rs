//! Session lifecycle state machine
//!
//! ```text
//! Connecting ──activate()──▶ Active ──close()──▶ Closed
//!      └──────────────close()──────────────────▶ Closed
//! ```
//!
//! `close()` reports `true` exactly once, which is what gates the registry removal.

use super::ConnectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Upgrade done, history replay in progress
    Connecting,
    /// Replay finished, live traffic flowing
    Active,
    /// Terminal
    Closed,
}

#[derive(Debug)]
pub struct Session {
    id: ConnectionId,
    state: SessionState,
}

impl Session {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            state: SessionState::Connecting,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// `Connecting -> Active`. Returns `false` (and changes nothing) from any other state.
    pub fn activate(&mut self) -> bool {
        if self.state != SessionState::Connecting {
            return false;
        }
        self.state = SessionState::Active;
        true
    }

    /// Move to `Closed`. Returns `true` only on the first call.
    pub fn close(&mut self) -> bool {
        if self.state == SessionState::Closed {
            return false;
        }
        self.state = SessionState::Closed;
        true
    }
}
