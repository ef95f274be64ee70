use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One unit of deferred delivery work: a fully formatted, already-escaped
/// message body plus its retry budget. Credentials are deliberately absent;
/// they are read fresh at send time so edits apply to queued work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwardMessageEvent {
    pub event_id: Uuid,
    pub text: String,
    pub attempt: u32,
    pub max_attempts: u32,
    pub scheduled_at: DateTime<Utc>,
}
