mod cli;
mod config;
mod diagnose_client;
mod notify;
mod responder;
#[cfg(test)]
mod test_support;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use eyre::Result;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::cli::chat::ChatContext;
use crate::config::{
    ResponderKind, Settings, DEFAULT_DELAY_MS, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS,
};
use crate::notify::{Notifier, TerminalNotifier};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    chat: ChatArgs,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Start a chat session
    Chat,
}

/// Accepted before or after the `chat` subcommand.
#[derive(Args, Clone, Debug)]
struct ChatArgs {
    /// Send a single message, print the reply and exit
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// Which responder answers: local keyword rules or the remote service
    #[arg(short, long, global = true, value_enum, env = "HEALTH_ASSISTANT_RESPONDER", default_value_t = ResponderKind::Rules)]
    responder: ResponderKind,

    /// Base URL of the diagnosis service
    #[arg(long, global = true, env = "HEALTH_ASSISTANT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Pause before a rule-based reply, in milliseconds
    #[arg(long, global = true, env = "HEALTH_ASSISTANT_DELAY_MS", default_value_t = DEFAULT_DELAY_MS)]
    delay_ms: u64,

    /// Timeout for requests to the diagnosis service, in seconds
    #[arg(long, global = true, env = "HEALTH_ASSISTANT_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    // Chat flags are global, so they land in `cli.chat` wherever they appear
    let args = match cli.command {
        Some(Commands::Chat) | None => cli.chat,
    };

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting AI Health Assistant");

    let settings = match Settings::new(args.responder, &args.endpoint, args.delay_ms, args.timeout_secs) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("Invalid configuration: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let responder = responder::from_settings(&settings, notifier.clone())?;

    let interactive = args.input.is_none();
    let mut chat_context = ChatContext::new(
        Box::new(io::stdout()),
        args.input,
        interactive,
        responder,
        notifier,
    );
    chat_context.run().await
}
