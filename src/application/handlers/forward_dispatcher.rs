use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    application::services::telegram::SendMessageClient,
    domain::{
        errors::DeliveryError, events::ForwardMessageEvent, repositories::CredentialRepository,
    },
};

/// Executes one forwarding task: validate credentials, send, classify.
///
/// No retry loop lives here; the worker that owns the task decides whether a
/// failure is worth another attempt.
pub struct ForwardDispatchHandler {
    credentials: Arc<dyn CredentialRepository>,
    client: Arc<dyn SendMessageClient>,
}

impl ForwardDispatchHandler {
    pub fn new(
        credentials: Arc<dyn CredentialRepository>,
        client: Arc<dyn SendMessageClient>,
    ) -> Self {
        Self {
            credentials,
            client,
        }
    }

    pub async fn handle(&self, event: &ForwardMessageEvent) -> Result<(), DeliveryError> {
        // Re-read on every attempt: the token can change between retries and
        // queued work must pick up the edit.
        let credentials = self.credentials.read().await;
        if !credentials.enabled || !credentials.is_valid() {
            warn!(
                task = %event.event_id,
                enabled = credentials.enabled,
                chat_id = %credentials.chat_id_safe(),
                token = %credentials.token_safe(),
                "telegram data is invalid, dropping task"
            );
            return Err(DeliveryError::InvalidCredentials);
        }

        debug!(task = %event.event_id, attempt = event.attempt, "sending message to telegram");
        self.client.send(&credentials, &event.text).await
    }
}
