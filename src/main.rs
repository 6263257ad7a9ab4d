mod config;
mod entities;
mod handlers;
mod models;
mod routes;
mod seeders;
mod services;
mod utils;

use std::net::SocketAddr;
use std::sync::Arc;

use config::{AppState, Config};
use dotenvy::dotenv;
use sea_orm::Database;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt::init();

    let cfg = Config::init();
    println!("🚀 Starting newsplus...");

    println!("📡 Connecting to Database...");
    let db = Database::connect(&cfg.database_url)
        .await
        .expect("🔥 Failed to connect to Database!");
    println!("✅ Database Connected!");

    println!("🌱 Running Seeders...");
    if let Err(e) = seeders::run_seeders(&db).await {
        tracing::error!("❌ Seeding failed: {}", e);
    } else {
        println!("✅ Seeding Successful!");
    }

    if cfg.disable_latest_news_widget {
        tracing::info!("Latest-news widget disabled by configuration");
    }

    let state = AppState {
        db: Arc::new(db),
        config: cfg.clone(),
    };
    let app = routes::create_routes(&cfg).with_state(state);

    let addr_str = format!("{}:{}", cfg.server_host, cfg.server_port);
    let addr: SocketAddr = addr_str.parse().expect("Invalid address");

    println!("🎯 Server ready! Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
