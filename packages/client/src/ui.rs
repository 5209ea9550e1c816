//! UI utilities for the client.

use std::io::Write;

/// Prompt shown before user input
pub fn prompt(username: Option<&str>) -> String {
    format!("{}> ", username.unwrap_or(""))
}

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(username: Option<&str>) {
    print!("{}", prompt(username));
    std::io::stdout().flush().ok();
}
