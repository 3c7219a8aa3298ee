use axum::{routing::get, Router};
use crate::config::AppState;
use crate::handlers::site_handler::*;

pub fn site_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_site_handler))
        .route("/vars", get(list_site_vars_handler).put(set_site_var_handler))
        .route("/vars/{name}", get(get_site_var_handler).delete(delete_site_var_handler))
}
