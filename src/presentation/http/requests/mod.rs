use poem_openapi::Object;

#[derive(Object, Debug)]
pub struct SmsFragmentDto {
    pub originating_address: Option<String>,
    pub display_originating_address: Option<String>,
    pub message_body: Option<String>,
    pub display_message_body: Option<String>,
    pub timestamp_millis: i64,
}

#[derive(Object, Debug)]
pub struct IngestSmsRequestDto {
    #[oai(validator(min_items = 1))]
    pub fragments: Vec<SmsFragmentDto>,
    pub device_manufacturer: Option<String>,
    pub device_model: Option<String>,
    pub sim_slot_index: Option<i32>,
    pub carrier: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Object, Debug)]
pub struct UpdateChatIdRequestDto {
    #[oai(validator(min_length = 1))]
    pub chat_id: String,
}

#[derive(Object, Debug)]
pub struct UpdateTokenRequestDto {
    #[oai(validator(min_length = 1))]
    pub token: String,
}

#[derive(Object, Debug)]
pub struct UpdateEnabledRequestDto {
    pub enabled: bool,
}

#[derive(Object, Debug)]
pub struct TestMessageRequestDto {
    /// When true the test goes through the forwarding queue instead of the
    /// direct synchronous path.
    #[oai(default)]
    pub queued: bool,
}
