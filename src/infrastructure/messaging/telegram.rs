use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    application::services::telegram::SendMessageClient,
    domain::{errors::DeliveryError, models::TelegramCredentials},
};

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Bot API adapter: builds the `sendMessage` request and classifies the
/// outcome. The base URL is injectable so tests can point it at a local
/// mock server.
pub struct TelegramBotClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Telegram wraps errors in a response envelope; the description is worth a
/// log line but the raw body is what gets reported upward.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    ok: bool,
    description: Option<String>,
}

impl TelegramBotClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: Client::builder()
                .user_agent("sms2tg/forwarder")
                .timeout(timeout)
                .build()
                .expect("failed to build telegram client"),
            base_url: base_url.into(),
        }
    }

    /// Pure request construction: no I/O, no validation. Malformed
    /// credentials produce a request the remote API will reject, which is an
    /// accepted cheap failure path.
    fn send_message_request<'a>(
        &self,
        credentials: &'a TelegramCredentials,
        text: &'a str,
    ) -> (String, SendMessageBody<'a>) {
        let url = format!("{}/bot{}/sendMessage", self.base_url, credentials.bot_token);
        let body = SendMessageBody {
            chat_id: &credentials.chat_id,
            text,
            parse_mode: "MarkdownV2",
        };
        (url, body)
    }
}

#[async_trait]
impl SendMessageClient for TelegramBotClient {
    async fn send(
        &self,
        credentials: &TelegramCredentials,
        text: &str,
    ) -> Result<(), DeliveryError> {
        let (url, body) = self.send_message_request(credentials, text);

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .json(&body)
            .send()
            .await
            // The request URL embeds the bot token; strip it before the
            // error text can reach a log line.
            .map_err(|err| DeliveryError::Transport(err.without_url().to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "telegram accepted message");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(&body) {
            warn!(
                status = status.as_u16(),
                ok = envelope.ok,
                description = envelope.description.as_deref().unwrap_or("(none)"),
                "telegram rejected message"
            );
        }
        Err(DeliveryError::RemoteRejected {
            status: status.as_u16(),
            body,
        })
    }
}
