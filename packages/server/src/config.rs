//! Relay configuration
//!
//! Populated by the binary's command-line parser; every field has a default.

use std::time::Duration;

use thiserror::Error;

/// Interval between two history resets
pub const DEFAULT_RESET_INTERVAL: Duration = Duration::from_secs(3600);

/// Longest accepted interval between two history resets (one year)
pub const MAX_RESET_INTERVAL: Duration = Duration::from_secs(365 * 24 * 3600);

/// Undelivered frames a connection may hold before it is dropped
///
/// A newcomer's outbox also gets one slot per history entry, since live frames queue up
/// while its replay is written to the socket.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("reset interval must be greater than zero")]
    ZeroResetInterval,

    #[error("reset interval must not exceed {max:?}, got {got:?}")]
    ResetIntervalTooLong { max: Duration, got: Duration },

    #[error("queue capacity must be greater than zero")]
    ZeroQueueCapacity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Period of the Maintenance Timer
    pub reset_interval: Duration,
    /// Capacity of each connection's outbox
    pub queue_capacity: usize,
    /// Optional system notice seeded into history at startup
    pub banner: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            reset_interval: DEFAULT_RESET_INTERVAL,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            banner: None,
        }
    }
}

impl RelayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reset_interval.is_zero() {
            return Err(ConfigError::ZeroResetInterval);
        }
        if self.reset_interval > MAX_RESET_INTERVAL {
            return Err(ConfigError::ResetIntervalTooLong {
                max: MAX_RESET_INTERVAL,
                got: self.reset_interval,
            });
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        Ok(())
    }
}
