use thiserror::Error;

pub type Result<T> = std::result::Result<T, TelegramError>;

#[derive(Debug, Error)]
pub enum TelegramError {
    /// Transport-level failure or body decode error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Bot API answered with `ok = false`.
    #[error("Telegram API error ({status}): {description}")]
    Api { status: u16, description: String },
}
