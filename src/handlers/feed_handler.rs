use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::config::AppState;
use crate::services::feed_service::FeedService;
use crate::utils::api_response::ResponseBuilder;

pub async fn feed_handler(State(state): State<AppState>) -> Response {
    match FeedService::channel(
        &state.db,
        &state.config.base_url,
        state.config.archive_page_size,
        Utc::now(),
    )
    .await
    {
        Ok(channel) => (
            [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
            channel.to_string(),
        )
            .into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
