use crate::config::AppState;
use crate::handlers::{content_handler, health_check_handler};
use axum::http::Method;
use axum::{routing::{get, post}, Router};
use tower_http::cors::{Any, CorsLayer};

pub mod content_route;
pub mod media_route;
pub mod menu_route;
pub mod site_route;

pub fn create_routes() -> Router<AppState> {
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
        .nest("/api/site", site_route::site_routes())
        .nest("/api/sections", content_route::section_routes())
        .nest("/api/articles", content_route::article_routes())
        .nest("/api/pages", content_route::page_routes())
        .nest("/api/series", content_route::series_routes())
        .nest("/api/media", media_route::media_routes())
        .nest("/api/menus", menu_route::menu_routes())
        .route("/api/home", get(content_handler::get_home_handler))
        .route("/api/home-pages", post(content_handler::create_home_page_handler))
        .route("/api/section-menu", get(content_handler::section_menu_handler))
        .route("/api/health", get(health_check_handler))
        .layer(cors)
}
