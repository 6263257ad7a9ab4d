use axum::{extract::State, response::IntoResponse};

use crate::config::AppState;
use crate::services::menu_service::MenuService;
use crate::utils::api_response::ResponseBuilder;

pub async fn menu_handler(State(state): State<AppState>) -> impl IntoResponse {
    match MenuService::nodes(&state.db).await {
        Ok(res) => ResponseBuilder::success("MENU_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
