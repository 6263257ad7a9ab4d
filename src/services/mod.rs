use axum::http::StatusCode;
use sea_orm::DbErr;

pub mod feed_service;
pub mod menu_service;
pub mod news_service;
pub mod topic_service;
pub mod widget_service;

/// (status, stable error code, human message)
pub type ServiceError = (StatusCode, &'static str, String);

pub(crate) fn db_err(err: DbErr) -> ServiceError {
    tracing::error!("database error: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "DB_ERR",
        "Database error".to_string(),
    )
}
