//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use relaychat_shared::{
    codec::{self, ChatMessage},
    time::get_timestamp,
};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use super::{
    error::ClientError,
    formatter::MessageFormatter,
    ui::{prompt, redisplay_prompt},
};

/// Render one text frame received from the relay
pub fn render_frame(text: &str, received_at: i64) -> String {
    match codec::decode(text.as_bytes()) {
        Ok(message) => MessageFormatter::format_message(&message, received_at),
        Err(e) => {
            tracing::debug!("Undecodable frame from server: {}", e);
            MessageFormatter::format_raw_message(text)
        }
    }
}

/// Encode one input line as a client payload
pub fn encode_line(username: Option<&str>, line: &str) -> String {
    codec::encode(&ChatMessage::user(username.unwrap_or_default(), line))
}

/// Run the WebSocket client session
pub async fn run_client_session(url: &str, username: Option<String>) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to relay!");
    println!(
        "{}",
        MessageFormatter::format_connected(url, username.as_deref())
    );

    let (mut write, mut read) = ws_stream.split();

    let username_for_read = username.clone();

    // Spawn a task to handle incoming messages (history replay first, then live traffic)
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    print!("{}", render_frame(text.as_str(), get_timestamp()));
                    redisplay_prompt(username_for_read.as_deref());
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(username_for_read.as_deref());
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let prompt_text = prompt(username.as_deref());
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt_text) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to handle stdin input and send to WebSocket
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let payload = encode_line(username.as_deref(), &line);
            if let Err(e) = write.send(Message::Text(payload.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                write_error = true;
                break;
            }
        }

        let _ = write.send(Message::Close(None)).await;
        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            if read_result.unwrap_or(false) {
                return Err(ClientError::ConnectionLost);
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            if write_result.unwrap_or(false) {
                return Err(ClientError::ConnectionLost);
            }
        }
    }

    Ok(())
}
