use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, payload::Json};

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    mappers::map_received_sms,
    requests::IngestSmsRequestDto,
    responses::IngestSmsResponseDto,
};

#[derive(Clone)]
pub struct SmsEndpoints {
    state: Arc<ApiState>,
}

impl SmsEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl SmsEndpoints {
    #[oai(path = "/sms", method = "post", tag = EndpointsTags::Sms)]
    pub async fn ingest(
        &self,
        request: Json<IngestSmsRequestDto>,
    ) -> PoemResult<Json<IngestSmsResponseDto>> {
        let sms = map_received_sms(&request.0);

        let response = self
            .state
            .ingest_sms_usecase
            .execute(sms)
            .await
            .map_err(bad_request)?;

        Ok(Json(IngestSmsResponseDto {
            task_ids: response.task_ids,
        }))
    }
}

fn bad_request(err: anyhow::Error) -> poem::Error {
    poem::Error::from_string(err.to_string(), poem::http::StatusCode::BAD_REQUEST)
}
