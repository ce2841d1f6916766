//! Minimal Telegram Bot API client.
//!
//! Covers exactly what the monitor needs: `sendMessage` with optional
//! Markdown formatting and inline URL buttons. Delivery retry is the
//! caller's concern, not this client's.

pub mod error;
pub mod types;

pub use error::{Result, TelegramError};
pub use types::{ApiResponse, InlineKeyboardButton, InlineKeyboardMarkup, Message};

use types::SendMessageRequest;

const BASE_URL: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct TelegramOptions {
    pub bot_token: String,
    pub chat_id: String,
}

pub struct TelegramClient {
    client: reqwest::Client,
    options: TelegramOptions,
}

impl TelegramClient {
    pub fn new(options: TelegramOptions) -> Self {
        Self {
            client: reqwest::Client::new(),
            options,
        }
    }

    /// Send a Markdown-formatted message to the configured chat.
    pub async fn send_message(
        &self,
        text: &str,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> Result<Message> {
        let url = format!(
            "{BASE_URL}/bot{token}/sendMessage",
            token = self.options.bot_token
        );
        let request = SendMessageRequest {
            chat_id: &self.options.chat_id,
            text,
            parse_mode: Some("Markdown"),
            reply_markup,
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        let body: ApiResponse<Message> = response.json().await?;

        if !body.ok {
            return Err(TelegramError::Api {
                status: status.as_u16(),
                description: body
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }

        match body.result {
            Some(message) => {
                tracing::debug!(message_id = message.message_id, "message sent");
                Ok(message)
            }
            None => Err(TelegramError::Api {
                status: status.as_u16(),
                description: "ok response without a result".to_string(),
            }),
        }
    }
}
