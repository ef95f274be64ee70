use std::io::Error;
use std::sync::Arc;
use std::time::Duration;

use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;
use tokio::main;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sms2tg::{
    application::{
        handlers::ForwardDispatchHandler,
        usecases::{
            ingest_sms::{IngestSmsConfig, IngestSmsUseCase},
            send_test_message::{SendTestMessageConfig, SendTestMessageUseCase},
            update_credentials::UpdateCredentialsUseCase,
        },
    },
    config::Config,
    domain::repositories::CredentialRepository,
    infrastructure::{
        messaging::TelegramBotClient,
        network::AlwaysOnline,
        queue::{ForwardQueueConfig, TokioForwardQueue},
        repositories::{InMemoryCredentialStore, KeyringCredentialStore},
    },
    presentation::http::endpoints::{
        health::HealthEndpoints, root::ApiState, settings::SettingsEndpoints, sms::SmsEndpoints,
    },
};

#[main]
async fn main() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sms2tg=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::try_parse().map_err(Error::other)?;

    let credentials: Arc<dyn CredentialRepository> = match &config.keyring_service {
        Some(service) => {
            info!(service = %service, "using keyring credential store");
            Arc::new(KeyringCredentialStore::new(service.clone()))
        }
        None => {
            info!("using in-memory credential store");
            Arc::new(InMemoryCredentialStore::new())
        }
    };

    let client = Arc::new(TelegramBotClient::new(
        config.telegram_api_base.clone(),
        Duration::from_secs(config.request_timeout_secs),
    ));

    let (queue, worker) = TokioForwardQueue::new(ForwardQueueConfig {
        initial_backoff: Duration::from_secs(config.initial_backoff_secs),
        max_backoff: Duration::from_secs(config.max_backoff_secs),
        network_poll_interval: Duration::from_secs(config.network_poll_secs),
    });

    let handler = Arc::new(ForwardDispatchHandler::new(
        credentials.clone(),
        client.clone(),
    ));
    let cancel = CancellationToken::new();
    worker.spawn(handler, queue.clone(), Arc::new(AlwaysOnline), cancel.clone());

    let state = Arc::new(ApiState {
        ingest_sms_usecase: Arc::new(IngestSmsUseCase::new(
            credentials.clone(),
            queue.clone(),
            IngestSmsConfig {
                max_attempts: config.max_attempts,
            },
        )),
        update_credentials_usecase: Arc::new(UpdateCredentialsUseCase::new(credentials.clone())),
        send_test_message_usecase: Arc::new(SendTestMessageUseCase::new(
            credentials,
            client,
            queue,
            SendTestMessageConfig {
                max_attempts: config.max_attempts,
            },
        )),
    });

    let server_url = format!("{}://{}:{}", config.scheme, config.host, config.port);
    info!(%server_url, "starting server");

    let api_service = OpenApiService::new(
        (
            HealthEndpoints,
            SmsEndpoints::new(state.clone()),
            SettingsEndpoints::new(state),
        ),
        "SMS Forwarder API",
        "0.1.0",
    )
    .server(format!("{}/api", server_url));
    let ui = api_service.swagger_ui();
    let app = Route::new().nest("/api", api_service).nest("/", ui);

    let shutdown = {
        let cancel = cancel.clone();
        async move {
            let _ = tokio::signal::ctrl_c().await;
            // Stops the worker loop; tasks mid-send abort without reporting.
            cancel.cancel();
        }
    };

    Server::new(TcpListener::bind(format!("{}:{}", config.host, config.port)))
        .run_with_graceful_shutdown(app, shutdown, None)
        .await
}
