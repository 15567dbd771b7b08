//! Main chat loop.
//!
//! Loads config, assembles the session, then reads lines until the user
//! leaves. Each message is one `Shell::process_input` turn followed by
//! `Shell::process_output` on the same channel.

use std::process::ExitCode;
use std::time::Duration;

use console::style;
use crossterm::style::Color;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use ghostshell_core::agent::Shell;
use ghostshell_infra::config::{data_dir, load_global_config};
use ghostshell_types::error::ShellError;
use ghostshell_types::llm::{CompletionResult, Message, MessageRole};

use crate::cli::Cli;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;
use super::setup::build_session;

/// Exit status when the session cannot be assembled.
const CONFIG_ERROR_EXIT: u8 = 2;

/// Run the interactive chat loop until the user exits.
pub async fn run_chat_loop(cli: &Cli) -> anyhow::Result<ExitCode> {
    let file_config = load_global_config(&data_dir()).await;

    let setup = match build_session(cli, file_config) {
        Ok(setup) => setup,
        Err(e) => {
            eprintln!("{} {e}", style("Error:").red().bold());
            return Ok(ExitCode::from(CONFIG_ERROR_EXIT));
        }
    };
    let mut shell = setup.shell;

    print_welcome_banner(
        &setup.source.to_string(),
        &setup.model,
        &cli.channel,
        &shell.enhancer_names(),
    );

    let renderer = ChatRenderer::new(Some(Color::Cyan));
    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => text,
        };

        if text.is_empty() {
            continue;
        }
        if commands::is_exit_word(&text) {
            break;
        }

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Exit => break,
                other => run_command(&mut shell, other),
            }
            continue;
        }

        match run_turn(&mut shell, text, &cli.channel).await {
            Ok(result) => print_result(&renderer, &result, cli.json)?,
            Err(e) => {
                tracing::debug!(error = ?e, "turn failed");
                eprintln!("\n  {} {e}", style("Error:").red().bold());
                eprintln!("  {}", style("Type a message to retry, /exit to quit.").dim());
            }
        }
    }

    println!("\n  {}", style("Goodbye!").dim());
    Ok(ExitCode::SUCCESS)
}

/// One user turn: route, complete, then shape the result for display.
async fn run_turn(
    shell: &mut Shell,
    text: String,
    channel: &str,
) -> Result<CompletionResult, ShellError> {
    let spinner = thinking_spinner();
    let outcome = shell.process_input(Message::user(text), channel).await;
    spinner.finish_and_clear();

    let result = outcome?;
    Ok(shell.process_output(result, channel)?)
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn print_result(
    renderer: &ChatRenderer,
    result: &CompletionResult,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!();
    if !result.content.is_empty() {
        println!("  {}", style("Assistant").cyan().bold());
        println!("{}", renderer.render(&result.content));
    }
    if result.has_tool_calls() {
        print!("{}", renderer.render_tool_calls(&result.tool_calls));
    }
    println!();
    Ok(())
}

fn run_command(shell: &mut Shell, cmd: ChatCommand) {
    match cmd {
        ChatCommand::Help => commands::print_help(),
        ChatCommand::Clear => {
            shell.ghost_mut().clear_history();
            println!("\n  {}\n", style("Conversation cleared.").dim());
        }
        ChatCommand::History => print_history(shell),
        ChatCommand::Set { key, value } => {
            let parsed = parse_scratch_value(value);
            println!("\n  {} {key} = {parsed}\n", style("*").cyan().bold());
            shell.ghost_mut().update_internal_state(key, parsed);
        }
        ChatCommand::Get(key) => match shell.ghost().get_internal_state(&key) {
            Some(value) => println!("\n  {key} = {value}\n"),
            None => println!("\n  {} {key} is not set\n", style("?").yellow().bold()),
        },
        ChatCommand::Unknown(message) => {
            println!(
                "\n  {} {}. Type /help for available commands.\n",
                style("?").yellow().bold(),
                style(message).dim()
            );
        }
        ChatCommand::Exit => {}
    }
}

/// JSON when the text parses as JSON, otherwise a plain string.
fn parse_scratch_value(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}

fn print_history(shell: &Shell) {
    let history = shell.ghost().history();
    println!();
    if history.is_empty() {
        println!("  {}", style("No messages yet.").dim());
    }
    for msg in &history {
        let label = match msg.role {
            MessageRole::User => style("You").green(),
            MessageRole::Assistant => style("Assistant").cyan(),
            MessageRole::System => style("System").yellow(),
        };
        println!("  {} {}", label.bold(), preview(&msg.content, 100));
    }
    println!();
}

/// First `max` characters of `content`, with `...` when cut.
fn preview(content: &str, max: usize) -> String {
    if content.chars().count() <= max {
        content.to_string()
    } else {
        let cut: String = content.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
