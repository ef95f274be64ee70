use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Terminal classification of one forwarding attempt.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Local validation failed; no network call was made.
    #[error("telegram data is invalid")]
    InvalidCredentials,
    /// The request never completed: connection failure, timeout or abort.
    #[error("transport error: {0}")]
    Transport(String),
    /// Telegram answered with a non-2xx status.
    #[error("telegram rejected the request: status {status}: {body}")]
    RemoteRejected { status: u16, body: String },
}

impl DeliveryError {
    /// Only transport failures are eligible for another attempt. A rejected
    /// request cannot be told apart from a transient server error by status
    /// alone, so rejections stay terminal and are left to the operator.
    pub fn is_transient(&self) -> bool {
        matches!(self, DeliveryError::Transport(_))
    }
}
