//! Terminal chat client for the relaychat relay.
//!
//! Prints the replayed history and every live message, and sends each line typed on stdin.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin relaychat-client -- --username alice
//! cargo run --bin relaychat-client -- -u ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;
use relaychat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "relaychat-client")]
#[command(about = "Terminal client for the relaychat WebSocket relay", long_about = None)]
struct Args {
    /// Name shown next to your messages (defaults to "Anonymous")
    #[arg(short = 'n', long, env = "RELAYCHAT_USERNAME")]
    username: Option<String>,

    /// WebSocket relay URL
    #[arg(short = 'u', long, env = "RELAYCHAT_URL", default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = relaychat_client::run_client(args.url, args.username).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
