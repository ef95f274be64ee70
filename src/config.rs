use std::env::var;

use dotenvy::dotenv;

pub struct Config {
    pub port: u16,
    pub scheme: String,
    pub host: String,
    pub telegram_api_base: String,
    pub request_timeout_secs: u64,
    pub max_attempts: u32,
    pub initial_backoff_secs: u64,
    pub max_backoff_secs: u64,
    pub network_poll_secs: u64,
    /// Service namespace for the OS keychain store; absent means the
    /// volatile in-memory store.
    pub keyring_service: Option<String>,
}

impl Config {
    pub fn try_parse() -> Result<Config, &'static str> {
        let _ = dotenv();

        Ok(Config {
            port: var("PORT")
                .map_err(|_| "An error occured while getting PORT env param")?
                .parse::<u16>()
                .map_err(|_| "An error occured while parsing PORT env param")?,
            scheme: var("SCHEME").map_err(|_| "An error occured while getting SCHEME env param")?,
            host: var("HOST").map_err(|_| "An error occured while getting HOST env param")?,
            telegram_api_base: var("TELEGRAM_API_BASE")
                .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
            request_timeout_secs: var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .map_err(|_| "An error occured while parsing REQUEST_TIMEOUT_SECS env param")?,
            max_attempts: var("MAX_ATTEMPTS")
                .unwrap_or_else(|_| "5".to_string())
                .parse::<u32>()
                .map_err(|_| "An error occured while parsing MAX_ATTEMPTS env param")?,
            initial_backoff_secs: var("INITIAL_BACKOFF_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse::<u64>()
                .map_err(|_| "An error occured while parsing INITIAL_BACKOFF_SECS env param")?,
            max_backoff_secs: var("MAX_BACKOFF_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse::<u64>()
                .map_err(|_| "An error occured while parsing MAX_BACKOFF_SECS env param")?,
            network_poll_secs: var("NETWORK_POLL_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse::<u64>()
                .map_err(|_| "An error occured while parsing NETWORK_POLL_SECS env param")?,
            keyring_service: var("KEYRING_SERVICE").ok(),
        })
    }
}
