use async_trait::async_trait;
use keyring::Entry;
use tokio::task;
use tracing::warn;

use crate::domain::{models::TelegramCredentials, repositories::CredentialRepository};

const CHAT_ID_KEY: &str = "chat_id";
const BOT_TOKEN_KEY: &str = "bot_token";
const ENABLED_KEY: &str = "enabled";

/// Credential store backed by the OS keychain, encrypted at rest. The three
/// values live as separate entries under one service namespace. Keyring I/O
/// is synchronous, so every call goes through `spawn_blocking`.
pub struct KeyringCredentialStore {
    service: String,
}

impl KeyringCredentialStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    async fn get(&self, key: &'static str) -> Option<String> {
        let service = self.service.clone();
        let result = task::spawn_blocking(move || {
            Entry::new(&service, key).and_then(|entry| entry.get_password())
        })
        .await;
        match result {
            Ok(Ok(value)) => Some(value),
            Ok(Err(keyring::Error::NoEntry)) => None,
            Ok(Err(err)) => {
                warn!(key, %err, "keychain read failed, falling back to default");
                None
            }
            Err(err) => {
                warn!(key, %err, "keychain task failed, falling back to default");
                None
            }
        }
    }

    async fn put(&self, key: &'static str, value: String) -> anyhow::Result<()> {
        let service = self.service.clone();
        task::spawn_blocking(move || {
            Entry::new(&service, key).and_then(|entry| entry.set_password(&value))
        })
        .await??;
        Ok(())
    }
}

#[async_trait]
impl CredentialRepository for KeyringCredentialStore {
    async fn read(&self) -> TelegramCredentials {
        TelegramCredentials {
            chat_id: self.get(CHAT_ID_KEY).await.unwrap_or_default(),
            bot_token: self.get(BOT_TOKEN_KEY).await.unwrap_or_default(),
            enabled: self
                .get(ENABLED_KEY)
                .await
                .map(|value| value == "true")
                .unwrap_or(false),
        }
    }

    async fn set_chat_id(&self, value: String) -> anyhow::Result<()> {
        self.put(CHAT_ID_KEY, value).await
    }

    async fn set_bot_token(&self, value: String) -> anyhow::Result<()> {
        self.put(BOT_TOKEN_KEY, value).await
    }

    async fn set_enabled(&self, value: bool) -> anyhow::Result<()> {
        self.put(ENABLED_KEY, value.to_string()).await
    }
}
