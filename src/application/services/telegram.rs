use async_trait::async_trait;

use crate::domain::{errors::DeliveryError, models::TelegramCredentials};

/// Port for the outbound `sendMessage` call. Implementations classify the
/// outcome but never retry; retry policy belongs to the queue worker.
#[async_trait]
pub trait SendMessageClient: Send + Sync {
    async fn send(
        &self,
        credentials: &TelegramCredentials,
        text: &str,
    ) -> Result<(), DeliveryError>;
}
