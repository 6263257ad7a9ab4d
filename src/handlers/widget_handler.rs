use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use crate::config::AppState;
use crate::models::widget_model::CreateWidgetConfigRequest;
use crate::services::widget_service::WidgetService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn create_widget_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateWidgetConfigRequest>,
) -> impl IntoResponse {
    match WidgetService::create_config(&state.db, payload).await {
        Ok(res) => {
            ResponseBuilder::created("WIDGET_CREATED", "Widget config created", res).into_response()
        }
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn render_widget_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match WidgetService::render(&state.db, id, Utc::now()).await {
        Ok(res) => ResponseBuilder::success("WIDGET_RENDERED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
