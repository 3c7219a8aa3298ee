mod config;
mod content;
mod entities;
mod error;
mod handlers;
mod models;
mod routes;
mod seeders;
mod services;
mod utils;

#[cfg(test)]
mod test_utils;

use config::{AppState, Config};
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = Config::init();
    tracing::info!("Starting GenericSite...");

    // 1. Database Connection
    let db = Database::connect(&cfg.database_url)
        .await
        .expect("Failed to connect to Database");
    tracing::info!("Database connected");

    // 2. Schema
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    // 3. Database Seeding
    if let Err(e) = seeders::run_seeders(&db, &cfg).await {
        tracing::error!("Seeding failed: {}", e);
    }

    // 4. Build App State
    let state = AppState { db, config: cfg.clone() };

    // 5. Initialize Router
    let app = routes::create_routes().with_state(state);

    // 6. Start Server
    let addr_str = format!("{}:{}", cfg.server_host, cfg.server_port);
    let addr: SocketAddr = addr_str.parse().expect("Invalid address");

    tracing::info!("Server ready! Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
