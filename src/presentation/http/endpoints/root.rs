use std::sync::Arc;

use poem_openapi::Tags;

use crate::application::usecases::{
    ingest_sms::IngestSmsUseCase, send_test_message::SendTestMessageUseCase,
    update_credentials::UpdateCredentialsUseCase,
};

#[derive(Clone)]
pub struct ApiState {
    pub ingest_sms_usecase: Arc<IngestSmsUseCase>,
    pub update_credentials_usecase: Arc<UpdateCredentialsUseCase>,
    pub send_test_message_usecase: Arc<SendTestMessageUseCase>,
}

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Health,
    Sms,
    Settings,
}
