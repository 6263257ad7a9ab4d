use axum::{
    routing::{get, put},
    Router,
};

use crate::config::{AppState, Config};
use crate::handlers::feed_handler::feed_handler;
use crate::handlers::menu_handler::menu_handler;
use crate::handlers::news_handler::*;
use crate::handlers::topic_handler::*;
use crate::handlers::widget_handler::*;

pub fn news_routes(cfg: &Config) -> Router<AppState> {
    let mut router = Router::new()
        .route("/", get(archive_index_handler).post(create_news_handler))
        .route("/topics", get(list_topics_handler).post(create_topic_handler))
        .route("/menu", get(menu_handler))
        .route("/feed", get(feed_handler))
        .route("/by_topic/{topic}", get(topic_index_handler))
        .route(
            "/by_topic/{topic}/{year}/{month}/{day}/{slug}",
            get(topic_detail_handler),
        )
        .route("/{year}", get(year_archive_handler))
        .route("/{year}/{month}", get(month_archive_handler))
        .route("/{year}/{month}/{day}", get(day_archive_handler))
        .route("/{year}/{month}/{day}/{slug}", get(detail_handler))
        .route(
            "/items/{id}",
            put(update_news_handler).delete(delete_news_handler),
        );

    // Widget registration is an explicit startup-time decision; when
    // disabled the routes simply do not exist.
    if !cfg.disable_latest_news_widget {
        router = router
            .route("/widgets", axum::routing::post(create_widget_handler))
            .route("/widgets/{id}/render", get(render_widget_handler));
    }

    router
}
