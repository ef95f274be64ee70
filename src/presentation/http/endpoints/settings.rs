use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, payload::Json};

use crate::{
    domain::errors::DomainError,
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        requests::{
            TestMessageRequestDto, UpdateChatIdRequestDto, UpdateEnabledRequestDto,
            UpdateTokenRequestDto,
        },
        responses::{SettingsStatusDto, TestMessageResponseDto},
    },
};

#[derive(Clone)]
pub struct SettingsEndpoints {
    state: Arc<ApiState>,
}

impl SettingsEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl SettingsEndpoints {
    #[oai(path = "/settings", method = "get", tag = EndpointsTags::Settings)]
    pub async fn status(&self) -> PoemResult<Json<SettingsStatusDto>> {
        let status = self.state.update_credentials_usecase.status().await;
        Ok(Json(SettingsStatusDto {
            chat_id: status.chat_id,
            bot_token: status.bot_token,
            enabled: status.enabled,
            valid: status.valid,
        }))
    }

    #[oai(
        path = "/settings/chat-id",
        method = "put",
        tag = EndpointsTags::Settings
    )]
    pub async fn update_chat_id(&self, request: Json<UpdateChatIdRequestDto>) -> PoemResult<()> {
        self.state
            .update_credentials_usecase
            .set_chat_id(&request.chat_id)
            .await
            .map_err(map_domain_error)?;
        Ok(())
    }

    #[oai(path = "/settings/token", method = "put", tag = EndpointsTags::Settings)]
    pub async fn update_token(&self, request: Json<UpdateTokenRequestDto>) -> PoemResult<()> {
        self.state
            .update_credentials_usecase
            .set_bot_token(&request.token)
            .await
            .map_err(map_domain_error)?;
        Ok(())
    }

    #[oai(
        path = "/settings/enabled",
        method = "put",
        tag = EndpointsTags::Settings
    )]
    pub async fn update_enabled(&self, request: Json<UpdateEnabledRequestDto>) -> PoemResult<()> {
        self.state
            .update_credentials_usecase
            .set_enabled(request.enabled)
            .await
            .map_err(map_domain_error)?;
        Ok(())
    }

    #[oai(
        path = "/settings/test-message",
        method = "post",
        tag = EndpointsTags::Settings
    )]
    pub async fn send_test_message(
        &self,
        request: Json<TestMessageRequestDto>,
    ) -> PoemResult<Json<TestMessageResponseDto>> {
        let result = if request.queued {
            self.state.send_test_message_usecase.execute_queued().await
        } else {
            self.state.send_test_message_usecase.execute_direct().await
        };

        let response = result.map_err(map_domain_error)?;
        Ok(Json(TestMessageResponseDto {
            queued: request.queued,
            task_id: response.task_id,
        }))
    }
}

/// Configuration problems come back as 400 so the caller can fix its input;
/// delivery failures on the direct test path surface as 502.
fn map_domain_error(err: DomainError) -> poem::Error {
    let status = match &err {
        DomainError::Validation(_) => poem::http::StatusCode::BAD_REQUEST,
        DomainError::Delivery(_) => poem::http::StatusCode::BAD_GATEWAY,
        DomainError::Other(_) => poem::http::StatusCode::INTERNAL_SERVER_ERROR,
    };
    poem::Error::from_string(err.to_string(), status)
}
