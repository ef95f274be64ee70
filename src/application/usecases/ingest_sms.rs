use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    application::services::{formatter::render_fragment, task_queue::ForwardQueue},
    domain::{
        events::ForwardMessageEvent, models::ReceivedSms, repositories::CredentialRepository,
    },
};

pub struct IngestSmsConfig {
    pub max_attempts: u32,
}

/// Entry point for raw notification events: formats each fragment and hands
/// one forwarding task per fragment to the queue.
pub struct IngestSmsUseCase {
    credentials: Arc<dyn CredentialRepository>,
    queue: Arc<dyn ForwardQueue>,
    config: IngestSmsConfig,
}

pub struct IngestSmsResponse {
    pub task_ids: Vec<Uuid>,
}

impl IngestSmsUseCase {
    pub fn new(
        credentials: Arc<dyn CredentialRepository>,
        queue: Arc<dyn ForwardQueue>,
        config: IngestSmsConfig,
    ) -> Self {
        Self {
            credentials,
            queue,
            config,
        }
    }

    pub async fn execute(&self, sms: ReceivedSms) -> anyhow::Result<IngestSmsResponse> {
        let credentials = self.credentials.read().await;
        if !credentials.enabled {
            anyhow::bail!("forwarding is disabled");
        }

        let mut task_ids = Vec::with_capacity(sms.fragments.len());
        for fragment in &sms.fragments {
            let event = ForwardMessageEvent {
                event_id: Uuid::new_v4(),
                text: render_fragment(fragment, &sms.device, &sms.sim),
                attempt: 1,
                max_attempts: self.config.max_attempts,
                scheduled_at: Utc::now(),
            };
            let task_id = event.event_id;
            info!(task = %task_id, fragments = sms.fragments.len(), "enqueuing forward task");
            self.queue.publish(event).await?;
            task_ids.push(task_id);
        }

        Ok(IngestSmsResponse { task_ids })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::*;
    use crate::{
        domain::models::{DeviceInfo, SimInfo, SmsFragment},
        infrastructure::repositories::in_memory::InMemoryCredentialStore,
    };

    #[derive(Default)]
    struct CapturingQueue {
        events: Mutex<Vec<ForwardMessageEvent>>,
    }

    #[async_trait]
    impl ForwardQueue for CapturingQueue {
        async fn publish(&self, event: ForwardMessageEvent) -> anyhow::Result<()> {
            self.events.lock().await.push(event);
            Ok(())
        }
    }

    fn sms(fragments: Vec<SmsFragment>) -> ReceivedSms {
        ReceivedSms {
            device: DeviceInfo {
                manufacturer: "Google".to_string(),
                model: "Pixel 8".to_string(),
            },
            sim: SimInfo {
                slot_index: 0,
                carrier: String::new(),
                phone_number: String::new(),
            },
            fragments,
        }
    }

    fn fragment(body: &str) -> SmsFragment {
        SmsFragment {
            originating_address: "+15551234567".to_string(),
            display_originating_address: "+15551234567".to_string(),
            message_body: body.to_string(),
            display_message_body: body.to_string(),
            timestamp_millis: 1_700_000_000_000,
        }
    }

    async fn enabled_store() -> Arc<InMemoryCredentialStore> {
        let store = Arc::new(InMemoryCredentialStore::new());
        store.set_chat_id("123456789".to_string()).await.unwrap();
        store
            .set_bot_token("123456:ABCdef-01_23".to_string())
            .await
            .unwrap();
        store.set_enabled(true).await.unwrap();
        store
    }

    #[tokio::test]
    async fn each_fragment_becomes_its_own_task() {
        let queue = Arc::new(CapturingQueue::default());
        let usecase = IngestSmsUseCase::new(
            enabled_store().await,
            queue.clone(),
            IngestSmsConfig { max_attempts: 3 },
        );

        let response = usecase
            .execute(sms(vec![fragment("part one"), fragment("part two")]))
            .await
            .unwrap();

        let events = queue.events.lock().await;
        assert_eq!(events.len(), 2);
        assert_eq!(response.task_ids.len(), 2);
        assert_ne!(events[0].event_id, events[1].event_id);
        assert!(events[0].text.contains("part one"));
        assert!(events[1].text.contains("part two"));
        assert!(events.iter().all(|e| e.attempt == 1 && e.max_attempts == 3));
    }

    #[tokio::test]
    async fn ingestion_is_refused_while_disabled() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let queue = Arc::new(CapturingQueue::default());
        let usecase =
            IngestSmsUseCase::new(store, queue.clone(), IngestSmsConfig { max_attempts: 3 });

        let result = usecase.execute(sms(vec![fragment("lost?")])).await;
        assert!(result.is_err());
        assert!(queue.events.lock().await.is_empty());
    }
}
