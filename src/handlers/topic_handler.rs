use axum::{extract::State, response::IntoResponse};

use crate::config::AppState;
use crate::models::topic_model::CreateTopicRequest;
use crate::services::topic_service::TopicService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn list_topics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match TopicService::list_topics(&state.db).await {
        Ok(res) => ResponseBuilder::success("TOPICS_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn create_topic_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateTopicRequest>,
) -> impl IntoResponse {
    match TopicService::create_topic(&state.db, payload).await {
        Ok(res) => ResponseBuilder::created("TOPIC_CREATED", "Topic created", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
