//! Console host for the sample screens
//!
//! Runs one chat over stdin/stdout. Pick the starting screen with
//! `CHATSTATE_SCREEN`; logs go to stderr as JSON.

use chatstate::config::BotConfig;
use chatstate::console::ConsoleAdapter;
use chatstate::{ChatId, ChatInfo, Dispatch, InMemoryStore, Processor};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatstate=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = BotConfig::from_env()?;
    tracing::info!(screen = config.screen.name(), user = %config.user_name, "Starting console bot");

    let chat = ChatInfo::new(ChatId::new("console")).with_user_name(config.user_name.clone());
    let adapter = ConsoleAdapter::new(chat.clone(), tokio::io::stdout(), config.honor_typing);
    let screen = config.screen;
    let processor: Processor<_, _, String> = Processor::new(
        InMemoryStore::new(),
        adapter,
        chatstate::initial_state(move |_| screen.initial()),
    );

    processor.start(chat).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/quit" {
            break;
        }
        match processor.handle(line).await {
            Ok(Dispatch::Dropped) => tracing::info!("Update not handled by the current screen"),
            Ok(_) => {}
            Err(e) if e.is_committed() => {
                tracing::warn!(error = %e, "State stored but delivery failed");
            }
            Err(e) => tracing::error!(error = %e, "Dispatch failed"),
        }
    }

    tracing::info!("Console bot stopped");
    Ok(())
}
