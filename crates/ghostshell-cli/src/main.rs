//! Ghostshell terminal chat entry point.
//!
//! Binary name: `ghostshell`
//!
//! Parses arguments, installs tracing, then hands over to the chat loop.

mod cli;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use ghostshell_observe::tracing_setup::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.log_filter(), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let outcome = cli::chat::loop_runner::run_chat_loop(&cli).await;
    shutdown_tracing();
    outcome
}
