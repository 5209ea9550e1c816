//! Reconnect loop around a client session.
//!
//! A reconnect is a brand new connection: the relay replays its current history again.

use std::{future::Future, time::Duration};

use super::{error::ClientError, session::run_client_session};

/// How often and how patiently the client retries a lost session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            interval: Duration::from_secs(5),
        }
    }
}

/// Run `session` until it ends cleanly or `policy.max_attempts` runs have failed.
pub async fn run_with_reconnect<F, Fut>(
    policy: ReconnectPolicy,
    mut session: F,
) -> Result<(), ClientError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<(), ClientError>>,
{
    let mut failures = 0;

    loop {
        let Err(e) = session(failures + 1).await else {
            tracing::info!("Client session ended normally");
            return Ok(());
        };

        failures += 1;
        tracing::warn!("Session {}/{} failed: {}", failures, policy.max_attempts, e);
        if failures >= policy.max_attempts {
            return Err(ClientError::ReconnectLimitExceeded(policy.max_attempts));
        }

        tracing::info!("Reconnecting in {:?}", policy.interval);
        tokio::time::sleep(policy.interval).await;
    }
}

/// Connect to `url` and keep the chat running, reconnecting with the default policy.
pub async fn run_client(url: String, username: Option<String>) -> Result<(), ClientError> {
    run_with_reconnect(ReconnectPolicy::default(), |attempt| {
        tracing::info!("Connecting to {} (attempt {})", url, attempt);
        run_client_session(&url, username.clone())
    })
    .await
}
