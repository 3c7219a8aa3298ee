use axum::{routing::{get, post}, Router};
use crate::config::AppState;
use crate::handlers::menu_handler::*;

pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_menus_handler).post(create_menu_handler))
        .route("/{slug}", get(get_menu_handler))
        .route("/{slug}/links", post(add_link_handler))
}
