use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

const DEFAULT_URL: &str = "https://earthquake.tmd.go.th/inside.html";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;
const DEFAULT_MIN_MAGNITUDE: f64 = 3.0;
const DEFAULT_MARKER_FILE: &str = "last_event.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// Source page to poll.
    pub earthquake_url: String,
    /// Time between ticks.
    pub poll_interval: Duration,
    /// Events below this magnitude are recorded but not delivered.
    pub min_magnitude: f64,
    /// Durable last-seen marker file.
    pub marker_path: PathBuf,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            earthquake_url: env::var("EARTHQUAKE_URL")
                .unwrap_or_else(|_| DEFAULT_URL.to_string()),
            poll_interval: Duration::from_secs(
                env::var("POLL_INTERVAL_SECS")
                    .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL_SECS.to_string())
                    .parse()
                    .context("POLL_INTERVAL_SECS must be a number of seconds")?,
            ),
            min_magnitude: env::var("MIN_MAGNITUDE")
                .unwrap_or_else(|_| DEFAULT_MIN_MAGNITUDE.to_string())
                .parse()
                .context("MIN_MAGNITUDE must be a number")?,
            marker_path: env::var("LAST_EVENT_FILE")
                .unwrap_or_else(|_| DEFAULT_MARKER_FILE.to_string())
                .into(),
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN")
                .context("TELEGRAM_BOT_TOKEN must be set")?,
            telegram_chat_id: env::var("TELEGRAM_CHAT_ID")
                .context("TELEGRAM_CHAT_ID must be set")?,
        })
    }
}
