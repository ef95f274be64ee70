use std::sync::LazyLock;

use regex::Regex;

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+:[A-Za-z0-9_-]+$").unwrap());

/// Bot credentials plus the switch gating whether forwarding is active.
///
/// Read fresh on every forwarding attempt; never cached across attempts.
#[derive(Debug, Clone, Default)]
pub struct TelegramCredentials {
    pub chat_id: String,
    pub bot_token: String,
    pub enabled: bool,
}

impl TelegramCredentials {
    pub fn is_valid(&self) -> bool {
        if self.chat_id.is_empty() || self.bot_token.is_empty() {
            return false;
        }
        if !TOKEN_REGEX.is_match(&self.bot_token) {
            return false;
        }
        self.chat_id.parse::<i64>().is_ok()
    }

    /// Redacted chat id for display surfaces: the last 5 characters are
    /// masked, short or malformed values get an error marker instead.
    pub fn chat_id_safe(&self) -> String {
        if self.chat_id.is_empty() {
            return "(empty)".to_string();
        }
        if self.chat_id.len() < 5 {
            return "(error: too short)".to_string();
        }
        if self.chat_id.parse::<i64>().is_err() {
            return "(error: not a number)".to_string();
        }
        let cut = self.chat_id.len() - 5;
        format!("{}*****", &self.chat_id[..cut])
    }

    /// The raw token never reaches a display surface, only its format verdict.
    pub fn token_safe(&self) -> String {
        if self.bot_token.is_empty() {
            return "(empty)".to_string();
        }
        if !TOKEN_REGEX.is_match(&self.bot_token) {
            return "(error: wrong format)".to_string();
        }
        "(OK)".to_string()
    }
}
