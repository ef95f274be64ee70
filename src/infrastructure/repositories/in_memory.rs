use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{models::TelegramCredentials, repositories::CredentialRepository};

/// Volatile credential store for tests and keyring-less deployments.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<TelegramCredentials>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialStore {
    async fn read(&self) -> TelegramCredentials {
        self.credentials.read().await.clone()
    }

    async fn set_chat_id(&self, value: String) -> anyhow::Result<()> {
        self.credentials.write().await.chat_id = value;
        Ok(())
    }

    async fn set_bot_token(&self, value: String) -> anyhow::Result<()> {
        self.credentials.write().await.bot_token = value;
        Ok(())
    }

    async fn set_enabled(&self, value: bool) -> anyhow::Result<()> {
        self.credentials.write().await.enabled = value;
        Ok(())
    }
}
