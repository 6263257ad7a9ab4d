use axum::http::Method;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::config::{AppState, Config};

pub mod news_route;

pub fn create_routes(cfg: &Config) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/news", news_route::news_routes(cfg))
        .route("/health", axum::routing::get(crate::handlers::health_check_handler))
        .layer(cors)
}
