use poem_openapi::Object;
use uuid::Uuid;

#[derive(Object)]
pub struct IngestSmsResponseDto {
    pub task_ids: Vec<Uuid>,
}

#[derive(Object)]
pub struct SettingsStatusDto {
    /// Redacted: trailing characters masked, or an error marker.
    pub chat_id: String,
    /// Redacted: "(OK)" or an error marker, never the token itself.
    pub bot_token: String,
    pub enabled: bool,
    pub valid: bool,
}

#[derive(Object)]
pub struct TestMessageResponseDto {
    pub queued: bool,
    pub task_id: Option<Uuid>,
}
