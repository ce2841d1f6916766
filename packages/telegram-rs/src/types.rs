use serde::{Deserialize, Serialize};

/// Bot API response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// The subset of a sent message we care about.
#[derive(Debug, Deserialize)]
pub struct Message {
    pub message_id: i64,
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// Inline buttons shown under the message.
#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// URL button. The Bot API supports more button kinds; links are all this
/// client needs.
#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub url: String,
}

impl InlineKeyboardMarkup {
    /// A single row of URL buttons.
    pub fn link_row(buttons: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            inline_keyboard: vec![buttons
                .into_iter()
                .map(|(text, url)| InlineKeyboardButton { text, url })
                .collect()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_absent_optionals() {
        let req = SendMessageRequest {
            chat_id: "42",
            text: "hello",
            parse_mode: None,
            reply_markup: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("parse_mode").is_none());
        assert!(json.get("reply_markup").is_none());
    }

    #[test]
    fn link_row_builds_one_keyboard_row() {
        let markup = InlineKeyboardMarkup::link_row([(
            "Map".to_string(),
            "https://maps.google.com/?q=19.1,98.5".to_string(),
        )]);
        assert_eq!(markup.inline_keyboard.len(), 1);
        assert_eq!(markup.inline_keyboard[0][0].text, "Map");
    }
}
