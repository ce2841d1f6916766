// Entry point for the earthquake monitor.

mod config;
mod notifier;
mod runner;

use anyhow::{Context, Result};
use quake_core::{Extractor, FileMarkerStore, NoveltyGate};
use telegram::{TelegramClient, TelegramOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use notifier::Notifier;
use runner::Monitor;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,quake_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TMD earthquake monitor");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        url = %config.earthquake_url,
        poll_interval_secs = config.poll_interval.as_secs(),
        min_magnitude = config.min_magnitude,
        marker = %config.marker_path.display(),
        "Configuration loaded"
    );

    let extractor =
        Extractor::new(config.earthquake_url.clone()).context("Failed to build extractor")?;

    let gate = NoveltyGate::load(FileMarkerStore::new(&config.marker_path)).await;

    let telegram = TelegramClient::new(TelegramOptions {
        bot_token: config.telegram_bot_token.clone(),
        chat_id: config.telegram_chat_id.clone(),
    });
    let notifier = Notifier::new(telegram, config.min_magnitude, config.earthquake_url.clone());

    let monitor = Monitor::new(extractor, gate, notifier, config.poll_interval);
    monitor.run_until_shutdown().await
}
