//! Slash command parsing for the chat loop.
//!
//! Commands start with `/`. The bare words `quit`, `exit` and `q` also end
//! the session.

use console::style;

/// In-chat controls.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    /// Forget the conversation so far (scratch state survives).
    Clear,
    History,
    /// Store a scratch value: `/set key value`.
    Set { key: String, value: String },
    /// Show a scratch value: `/get key`.
    Get(String),
    Exit,
    /// Unknown command or missing argument; carries the message to show.
    Unknown(String),
}

/// Whether `input` is one of the bare exit words, in any case.
pub fn is_exit_word(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "quit" | "exit" | "q")
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/clear" => ChatCommand::Clear,
        "/history" => ChatCommand::History,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        "/set" => match rest.split_once(char::is_whitespace) {
            Some((key, value)) if !value.trim().is_empty() => ChatCommand::Set {
                key: key.to_string(),
                value: value.trim().to_string(),
            },
            _ => ChatCommand::Unknown("/set requires a key and a value".to_string()),
        },
        "/get" if !rest.is_empty() => ChatCommand::Get(rest.to_string()),
        "/get" => ChatCommand::Unknown("/get requires a key".to_string()),
        other => ChatCommand::Unknown(format!("unknown command {other}")),
    };
    Some(command)
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Forget the conversation so far"),
        ("/history", "Show conversation history"),
        ("/set <key> <value>", "Store a value in session state"),
        ("/get <key>", "Show a value from session state"),
        ("/exit", "End the chat session"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (command, description) in rows {
        println!("  {:<20} {}", style(command).cyan(), description);
    }
    println!();
    println!(
        "  {}",
        style("quit, exit or q also end the session. Ctrl+D to exit, Ctrl+C is safe.").dim()
    );
    println!();
}
