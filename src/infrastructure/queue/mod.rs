use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{
    application::{
        handlers::ForwardDispatchHandler,
        services::{network::NetworkMonitor, task_queue::ForwardQueue},
    },
    domain::events::ForwardMessageEvent,
};

#[derive(Debug, Clone, Copy)]
pub struct ForwardQueueConfig {
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub network_poll_interval: Duration,
}

impl Default for ForwardQueueConfig {
    fn default() -> Self {
        Self {
            initial_backoff: Duration::from_secs(5),
            max_backoff: Duration::from_secs(300),
            network_poll_interval: Duration::from_secs(15),
        }
    }
}

/// In-process scheduling layer. `publish` is a channel send and never blocks
/// on network I/O; the worker owns delivery, retry and cancellation.
pub struct TokioForwardQueue {
    tx: mpsc::UnboundedSender<ForwardMessageEvent>,
}

impl TokioForwardQueue {
    pub fn new(config: ForwardQueueConfig) -> (Arc<Self>, ForwardWorker) {
        let (tx, rx) = mpsc::unbounded_channel();
        let queue = Arc::new(Self { tx });
        let worker = ForwardWorker { rx, config };
        (queue, worker)
    }
}

#[async_trait::async_trait]
impl ForwardQueue for TokioForwardQueue {
    async fn publish(&self, event: ForwardMessageEvent) -> anyhow::Result<()> {
        self.tx
            .send(event)
            .map_err(|_| anyhow::anyhow!("forward worker is gone"))?;
        Ok(())
    }
}

pub struct ForwardWorker {
    rx: mpsc::UnboundedReceiver<ForwardMessageEvent>,
    config: ForwardQueueConfig,
}

impl ForwardWorker {
    pub fn spawn(
        self,
        handler: Arc<ForwardDispatchHandler>,
        queue: Arc<TokioForwardQueue>,
        network: Arc<dyn NetworkMonitor>,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(self.run(handler, queue, network, cancel))
    }

    async fn run(
        self,
        handler: Arc<ForwardDispatchHandler>,
        queue: Arc<TokioForwardQueue>,
        network: Arc<dyn NetworkMonitor>,
        cancel: CancellationToken,
    ) {
        let config = self.config;
        let mut events = UnboundedReceiverStream::new(self.rx);
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                event = events.next() => {
                    let Some(event) = event else { break };
                    // Tasks are independent; deliveries run concurrently with
                    // no ordering guarantee relative to enqueue order.
                    tokio::spawn(process_event(
                        event,
                        handler.clone(),
                        queue.clone(),
                        network.clone(),
                        config,
                        cancel.child_token(),
                    ));
                }
            }
        }
        info!("forward worker stopped");
    }
}

async fn process_event(
    event: ForwardMessageEvent,
    handler: Arc<ForwardDispatchHandler>,
    queue: Arc<TokioForwardQueue>,
    network: Arc<dyn NetworkMonitor>,
    config: ForwardQueueConfig,
    cancel: CancellationToken,
) {
    // Network precondition: never start a Sending transition that is certain
    // to fail.
    while !network.is_online().await {
        debug!(task = %event.event_id, "network unavailable, waiting");
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = sleep(config.network_poll_interval) => {}
        }
    }

    let outcome = tokio::select! {
        biased;
        // A cancelled task aborts the in-flight call and reports no outcome.
        _ = cancel.cancelled() => {
            info!(task = %event.event_id, "task cancelled while sending");
            return;
        }
        outcome = handler.handle(&event) => outcome,
    };

    match outcome {
        Ok(()) => {
            info!(task = %event.event_id, attempt = event.attempt, "message delivered");
        }
        Err(err) if err.is_transient() && event.attempt < event.max_attempts => {
            let delay = backoff_delay(&config, event.attempt);
            warn!(
                task = %event.event_id,
                attempt = event.attempt,
                max_attempts = event.max_attempts,
                delay_ms = delay.as_millis() as u64,
                %err,
                "transient delivery failure, scheduling retry"
            );
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = sleep(delay) => {}
            }
            let mut next = event;
            next.attempt += 1;
            if let Err(publish_err) = queue.publish(next).await {
                error!(%publish_err, "failed to requeue task");
            }
        }
        Err(err) => {
            error!(
                task = %event.event_id,
                attempt = event.attempt,
                %err,
                "delivery failed"
            );
        }
    }
}

fn backoff_delay(config: &ForwardQueueConfig, attempt: u32) -> Duration {
    let doublings = attempt.saturating_sub(1).min(16);
    (config.initial_backoff * 2u32.pow(doublings)).min(config.max_backoff)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::{
        application::services::telegram::SendMessageClient,
        domain::{
            errors::DeliveryError, models::TelegramCredentials,
            repositories::CredentialRepository,
        },
        infrastructure::{network::AlwaysOnline, repositories::in_memory::InMemoryCredentialStore},
    };

    struct FlakyClient {
        calls: AtomicUsize,
        transient_failures: usize,
    }

    #[async_trait]
    impl SendMessageClient for FlakyClient {
        async fn send(
            &self,
            _credentials: &TelegramCredentials,
            _text: &str,
        ) -> Result<(), DeliveryError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.transient_failures {
                return Err(DeliveryError::Transport("connection reset".to_string()));
            }
            Ok(())
        }
    }

    struct RejectingClient {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SendMessageClient for RejectingClient {
        async fn send(
            &self,
            _credentials: &TelegramCredentials,
            _text: &str,
        ) -> Result<(), DeliveryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DeliveryError::RemoteRejected {
                status: 401,
                body: r#"{"ok":false}"#.to_string(),
            })
        }
    }

    struct SwitchableNetwork {
        online: AtomicBool,
    }

    #[async_trait]
    impl NetworkMonitor for SwitchableNetwork {
        async fn is_online(&self) -> bool {
            self.online.load(Ordering::SeqCst)
        }
    }

    fn fast_config() -> ForwardQueueConfig {
        ForwardQueueConfig {
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
            network_poll_interval: Duration::from_millis(1),
        }
    }

    fn event(max_attempts: u32) -> ForwardMessageEvent {
        ForwardMessageEvent {
            event_id: Uuid::new_v4(),
            text: "hello".to_string(),
            attempt: 1,
            max_attempts,
            scheduled_at: Utc::now(),
        }
    }

    async fn valid_store() -> Arc<InMemoryCredentialStore> {
        let store = Arc::new(InMemoryCredentialStore::new());
        store.set_chat_id("123456789".to_string()).await.unwrap();
        store
            .set_bot_token("123456:ABCdef-01_23".to_string())
            .await
            .unwrap();
        store.set_enabled(true).await.unwrap();
        store
    }

    async fn wait_for(calls: &AtomicUsize, expected: usize) {
        for _ in 0..200 {
            if calls.load(Ordering::SeqCst) >= expected {
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "expected {expected} calls, saw {}",
            calls.load(Ordering::SeqCst)
        );
    }

    #[tokio::test]
    async fn transient_failures_are_retried_until_success() {
        let client = Arc::new(FlakyClient {
            calls: AtomicUsize::new(0),
            transient_failures: 1,
        });
        let handler = Arc::new(ForwardDispatchHandler::new(
            valid_store().await,
            client.clone(),
        ));
        let (queue, worker) = TokioForwardQueue::new(fast_config());
        let cancel = CancellationToken::new();
        worker.spawn(handler, queue.clone(), Arc::new(AlwaysOnline), cancel.clone());

        queue.publish(event(3)).await.unwrap();
        wait_for(&client.calls, 2).await;
        cancel.cancel();
    }

    #[tokio::test]
    async fn rejections_are_terminal_and_never_retried() {
        let client = Arc::new(RejectingClient {
            calls: AtomicUsize::new(0),
        });
        let handler = Arc::new(ForwardDispatchHandler::new(
            valid_store().await,
            client.clone(),
        ));
        let (queue, worker) = TokioForwardQueue::new(fast_config());
        let cancel = CancellationToken::new();
        worker.spawn(handler, queue.clone(), Arc::new(AlwaysOnline), cancel.clone());

        queue.publish(event(3)).await.unwrap();
        wait_for(&client.calls, 1).await;
        sleep(Duration::from_millis(100)).await;
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        cancel.cancel();
    }

    #[tokio::test]
    async fn retry_budget_is_bounded_by_max_attempts() {
        let client = Arc::new(FlakyClient {
            calls: AtomicUsize::new(0),
            transient_failures: usize::MAX,
        });
        let handler = Arc::new(ForwardDispatchHandler::new(
            valid_store().await,
            client.clone(),
        ));
        let (queue, worker) = TokioForwardQueue::new(fast_config());
        let cancel = CancellationToken::new();
        worker.spawn(handler, queue.clone(), Arc::new(AlwaysOnline), cancel.clone());

        queue.publish(event(2)).await.unwrap();
        wait_for(&client.calls, 2).await;
        sleep(Duration::from_millis(100)).await;
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
        cancel.cancel();
    }

    #[tokio::test]
    async fn cancelled_worker_processes_nothing() {
        let client = Arc::new(FlakyClient {
            calls: AtomicUsize::new(0),
            transient_failures: 0,
        });
        let handler = Arc::new(ForwardDispatchHandler::new(
            valid_store().await,
            client.clone(),
        ));
        let (queue, worker) = TokioForwardQueue::new(fast_config());
        let cancel = CancellationToken::new();
        cancel.cancel();
        worker.spawn(handler, queue.clone(), Arc::new(AlwaysOnline), cancel);

        // The worker may already be gone; either way nothing must be sent.
        let _ = queue.publish(event(3)).await;
        sleep(Duration::from_millis(100)).await;
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sends_wait_for_the_network_precondition() {
        let client = Arc::new(FlakyClient {
            calls: AtomicUsize::new(0),
            transient_failures: 0,
        });
        let network = Arc::new(SwitchableNetwork {
            online: AtomicBool::new(false),
        });
        let handler = Arc::new(ForwardDispatchHandler::new(
            valid_store().await,
            client.clone(),
        ));
        let (queue, worker) = TokioForwardQueue::new(fast_config());
        let cancel = CancellationToken::new();
        worker.spawn(handler, queue.clone(), network.clone(), cancel.clone());

        queue.publish(event(3)).await.unwrap();
        sleep(Duration::from_millis(50)).await;
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);

        network.online.store(true, Ordering::SeqCst);
        wait_for(&client.calls, 1).await;
        cancel.cancel();
    }

    #[test]
    fn backoff_doubles_per_attempt_and_is_capped() {
        let config = ForwardQueueConfig {
            initial_backoff: Duration::from_secs(5),
            max_backoff: Duration::from_secs(30),
            network_poll_interval: Duration::from_secs(1),
        };
        assert_eq!(backoff_delay(&config, 1), Duration::from_secs(5));
        assert_eq!(backoff_delay(&config, 2), Duration::from_secs(10));
        assert_eq!(backoff_delay(&config, 3), Duration::from_secs(20));
        assert_eq!(backoff_delay(&config, 4), Duration::from_secs(30));
        assert_eq!(backoff_delay(&config, 10), Duration::from_secs(30));
    }
}
