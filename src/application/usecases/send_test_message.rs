use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    application::services::{
        formatter::local_timestamp, task_queue::ForwardQueue, telegram::SendMessageClient,
    },
    domain::{
        errors::DomainError, events::ForwardMessageEvent, markdown::escape_markdown_v2,
        repositories::CredentialRepository,
    },
};

pub struct SendTestMessageConfig {
    pub max_attempts: u32,
}

/// Manual test trigger. The direct path reports the delivery verdict to the
/// caller synchronously; the queued path exercises the same pipeline real
/// forwards take.
pub struct SendTestMessageUseCase {
    credentials: Arc<dyn CredentialRepository>,
    client: Arc<dyn SendMessageClient>,
    queue: Arc<dyn ForwardQueue>,
    config: SendTestMessageConfig,
}

pub struct TestMessageResponse {
    /// Present when the message went through the queue instead of directly.
    pub task_id: Option<Uuid>,
}

impl SendTestMessageUseCase {
    pub fn new(
        credentials: Arc<dyn CredentialRepository>,
        client: Arc<dyn SendMessageClient>,
        queue: Arc<dyn ForwardQueue>,
        config: SendTestMessageConfig,
    ) -> Self {
        Self {
            credentials,
            client,
            queue,
            config,
        }
    }

    pub async fn execute_direct(&self) -> Result<TestMessageResponse, DomainError> {
        let credentials = self.credentials.read().await;
        if !credentials.is_valid() {
            return Err(DomainError::Validation(
                "telegram data is invalid".to_string(),
            ));
        }
        self.client.send(&credentials, &test_text()).await?;
        Ok(TestMessageResponse { task_id: None })
    }

    pub async fn execute_queued(&self) -> Result<TestMessageResponse, DomainError> {
        let credentials = self.credentials.read().await;
        if !credentials.is_valid() {
            return Err(DomainError::Validation(
                "telegram data is invalid".to_string(),
            ));
        }
        let event = ForwardMessageEvent {
            event_id: Uuid::new_v4(),
            text: test_text(),
            attempt: 1,
            max_attempts: self.config.max_attempts,
            scheduled_at: Utc::now(),
        };
        let task_id = event.event_id;
        self.queue
            .publish(event)
            .await
            .map_err(DomainError::Other)?;
        Ok(TestMessageResponse {
            task_id: Some(task_id),
        })
    }
}

fn test_text() -> String {
    format!(
        "*sms2tg:* test message on {}",
        escape_markdown_v2(&local_timestamp(Utc::now().timestamp_millis()))
    )
}
