//! WebSocket chat relay server.
//!
//! Broadcasts every message to all connected clients and replays the buffered history to
//! newcomers. History is cleared on a fixed interval.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin relaychat-server
//! cargo run --bin relaychat-server -- --host 0.0.0.0 --port 3000 --reset-interval-secs 600
//! ```

use std::time::Duration;

use clap::Parser;
use relaychat_server::{
    config::{DEFAULT_QUEUE_CAPACITY, RelayConfig},
    ui::Server,
};
use relaychat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "relaychat-server")]
#[command(about = "WebSocket chat relay with history replay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "RELAYCHAT_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "RELAYCHAT_PORT", default_value_t = 8080)]
    port: u16,

    /// Seconds between two history resets
    #[arg(long, env = "RELAYCHAT_RESET_INTERVAL_SECS", default_value_t = 3600)]
    reset_interval_secs: u64,

    /// Undelivered messages a client may lag behind before it is disconnected
    #[arg(long, env = "RELAYCHAT_QUEUE_CAPACITY", default_value_t = DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: usize,

    /// System notice shown to clients until the first history reset
    #[arg(long, env = "RELAYCHAT_BANNER")]
    banner: Option<String>,
}

impl From<&Args> for RelayConfig {
    fn from(args: &Args) -> Self {
        Self {
            reset_interval: Duration::from_secs(args.reset_interval_secs),
            queue_capacity: args.queue_capacity,
            banner: args.banner.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = RelayConfig::from(&args);

    let server = match Server::in_memory(&config).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
