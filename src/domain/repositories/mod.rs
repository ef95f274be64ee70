use async_trait::async_trait;

use crate::domain::models::TelegramCredentials;

/// Accessor over the encrypted key-value store holding the bot credentials.
///
/// Reads never fail: a missing or unreadable field falls back to its default
/// so a forwarding attempt always sees a usable snapshot. Writes are
/// independent partial updates; no multi-field transaction is offered.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn read(&self) -> TelegramCredentials;
    async fn set_chat_id(&self, value: String) -> anyhow::Result<()>;
    async fn set_bot_token(&self, value: String) -> anyhow::Result<()>;
    async fn set_enabled(&self, value: bool) -> anyhow::Result<()>;
}
