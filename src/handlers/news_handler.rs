use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use crate::config::AppState;
use crate::models::news_model::*;
use crate::services::news_service::NewsService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn archive_index_handler(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> impl IntoResponse {
    let page = q.page.unwrap_or(1);
    match NewsService::archive_index(&state.db, state.config.archive_page_size, page, Utc::now())
        .await
    {
        Ok(res) => ResponseBuilder::success("ARCHIVE_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn topic_index_handler(
    State(state): State<AppState>,
    Path(topic): Path<String>,
    Query(q): Query<PageQuery>,
) -> impl IntoResponse {
    let page = q.page.unwrap_or(1);
    match NewsService::topic_index(
        &state.db,
        state.config.archive_page_size,
        &topic,
        page,
        Utc::now(),
    )
    .await
    {
        Ok(res) => ResponseBuilder::success("ARCHIVE_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn year_archive_handler(
    State(state): State<AppState>,
    Path(year): Path<String>,
    Query(q): Query<PageQuery>,
) -> impl IntoResponse {
    let page = q.page.unwrap_or(1);
    let Ok(year) = year.parse::<i32>() else {
        return archive_not_found();
    };
    match NewsService::date_archive(
        &state.db,
        state.config.archive_page_size,
        year,
        None,
        None,
        page,
        Utc::now(),
    )
    .await
    {
        Ok(res) => ResponseBuilder::success("ARCHIVE_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn month_archive_handler(
    State(state): State<AppState>,
    Path((year, month)): Path<(String, String)>,
    Query(q): Query<PageQuery>,
) -> impl IntoResponse {
    let page = q.page.unwrap_or(1);
    let (Ok(year), Ok(month)) = (year.parse::<i32>(), month.parse::<u32>()) else {
        return archive_not_found();
    };
    match NewsService::date_archive(
        &state.db,
        state.config.archive_page_size,
        year,
        Some(month),
        None,
        page,
        Utc::now(),
    )
    .await
    {
        Ok(res) => ResponseBuilder::success("ARCHIVE_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn day_archive_handler(
    State(state): State<AppState>,
    Path((year, month, day)): Path<(String, String, String)>,
    Query(q): Query<PageQuery>,
) -> impl IntoResponse {
    let page = q.page.unwrap_or(1);
    let (Ok(year), Ok(month), Ok(day)) =
        (year.parse::<i32>(), month.parse::<u32>(), day.parse::<u32>())
    else {
        return archive_not_found();
    };
    match NewsService::date_archive(
        &state.db,
        state.config.archive_page_size,
        year,
        Some(month),
        Some(day),
        page,
        Utc::now(),
    )
    .await
    {
        Ok(res) => ResponseBuilder::success("ARCHIVE_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn detail_handler(
    State(state): State<AppState>,
    Path((year, month, day, slug)): Path<(String, String, String, String)>,
) -> impl IntoResponse {
    let (Ok(year), Ok(month), Ok(day)) =
        (year.parse::<i32>(), month.parse::<u32>(), day.parse::<u32>())
    else {
        return archive_not_found();
    };
    match NewsService::detail(
        &state.db,
        state.config.sidebar_news_limit,
        year,
        month,
        day,
        &slug,
        None,
        Utc::now(),
    )
    .await
    {
        Ok(res) => ResponseBuilder::success("NEWS_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn topic_detail_handler(
    State(state): State<AppState>,
    Path((topic, year, month, day, slug)): Path<(String, String, String, String, String)>,
) -> impl IntoResponse {
    let (Ok(year), Ok(month), Ok(day)) =
        (year.parse::<i32>(), month.parse::<u32>(), day.parse::<u32>())
    else {
        return archive_not_found();
    };
    match NewsService::detail(
        &state.db,
        state.config.sidebar_news_limit,
        year,
        month,
        day,
        &slug,
        Some(&topic),
        Utc::now(),
    )
    .await
    {
        Ok(res) => ResponseBuilder::success("NEWS_FETCHED", "Success", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn create_news_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateNewsRequest>,
) -> impl IntoResponse {
    match NewsService::create_news(&state.db, payload).await {
        Ok(res) => ResponseBuilder::created("NEWS_CREATED", "News item created", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn update_news_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateNewsRequest>,
) -> impl IntoResponse {
    match NewsService::update_news(&state.db, id, payload).await {
        Ok(res) => ResponseBuilder::success("NEWS_UPDATED", "News item updated", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

pub async fn delete_news_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match NewsService::delete_news(&state.db, id).await {
        Ok(()) => ResponseBuilder::success::<()>("NEWS_DELETED", "News item deleted", ())
            .into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}

fn archive_not_found() -> axum::response::Response {
    ResponseBuilder::error::<()>(StatusCode::NOT_FOUND, "ARCHIVE_NOT_FOUND", "No such archive")
        .into_response()
}
