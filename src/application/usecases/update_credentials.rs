use std::sync::Arc;

use crate::domain::{errors::DomainError, repositories::CredentialRepository};

/// Redacted snapshot for display surfaces; raw values never leave the store.
pub struct CredentialStatus {
    pub chat_id: String,
    pub bot_token: String,
    pub enabled: bool,
    pub valid: bool,
}

pub struct UpdateCredentialsUseCase {
    credentials: Arc<dyn CredentialRepository>,
}

impl UpdateCredentialsUseCase {
    pub fn new(credentials: Arc<dyn CredentialRepository>) -> Self {
        Self { credentials }
    }

    pub async fn set_chat_id(&self, value: &str) -> Result<(), DomainError> {
        self.credentials
            .set_chat_id(value.trim().to_string())
            .await?;
        Ok(())
    }

    pub async fn set_bot_token(&self, value: &str) -> Result<(), DomainError> {
        self.credentials
            .set_bot_token(value.trim().to_string())
            .await?;
        Ok(())
    }

    /// Enabling validates the stored data at the moment of the request and is
    /// refused when it does not pass. The toggle never validates after the
    /// fact; disabling is always allowed.
    pub async fn set_enabled(&self, enabled: bool) -> Result<(), DomainError> {
        if enabled {
            let current = self.credentials.read().await;
            if !current.is_valid() {
                return Err(DomainError::Validation(
                    "telegram data is invalid".to_string(),
                ));
            }
        }
        self.credentials.set_enabled(enabled).await?;
        Ok(())
    }

    pub async fn status(&self) -> CredentialStatus {
        let current = self.credentials.read().await;
        CredentialStatus {
            chat_id: current.chat_id_safe(),
            bot_token: current.token_safe(),
            enabled: current.enabled,
            valid: current.is_valid(),
        }
    }
}
