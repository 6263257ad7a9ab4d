use std::env;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    /// Prefix for canonical links in the feed, without a trailing slash.
    pub base_url: String,
    pub archive_page_size: u64,
    pub sidebar_news_limit: u64,
    pub disable_latest_news_widget: bool,
}

// DatabaseConnection is not Clone with the mock feature on, which test
// builds pull in; sharing it behind an Arc keeps the state cloneable for
// the router either way.
#[derive(Clone, axum::extract::FromRef)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Config,
}

impl Config {
    pub fn init() -> Config {
        let server_host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .expect("PORT must be a number");

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in .env");

        let base_url = env::var("BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let archive_page_size = env::var("ARCHIVE_PAGE_SIZE")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .expect("ARCHIVE_PAGE_SIZE must be a number")
            .max(1);

        let sidebar_news_limit = env::var("SIDEBAR_NEWS_LIMIT")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .expect("SIDEBAR_NEWS_LIMIT must be a number");

        let disable_latest_news_widget = env::var("DISABLE_LATEST_NEWS_WIDGET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Config {
            server_host,
            server_port,
            database_url,
            base_url,
            archive_page_size,
            sidebar_news_limit,
            disable_latest_news_widget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn app_state_is_cloneable_for_the_router() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let state = AppState {
            db,
            config: Config {
                server_host: "0.0.0.0".to_string(),
                server_port: 3000,
                database_url: String::new(),
                base_url: "http://localhost:3000".to_string(),
                archive_page_size: 10,
                sidebar_news_limit: 10,
                disable_latest_news_widget: false,
            },
        };

        let copy = state.clone();
        assert_eq!(copy.config.archive_page_size, 10);
    }
}
