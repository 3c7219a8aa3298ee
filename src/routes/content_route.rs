use axum::{routing::{get, post, put}, Router};
use crate::config::AppState;
use crate::handlers::content_handler::*;
use crate::handlers::media_handler::*;

pub fn section_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sections_handler).post(create_section_handler))
        .route("/{slug}", get(get_section_handler).delete(delete_section_handler))
        .route("/{slug}/articles", get(list_section_articles_handler))
        .route("/{slug}/articles/{article}", get(get_article_handler))
}

pub fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_article_handler))
        .route("/{id}/images", post(attach_image_handler))
        .route("/{id}/images/order", put(reorder_images_handler))
        .route("/{id}/images/{item_id}", put(update_image_item_handler).delete(detach_image_handler))
        .route("/{id}/audio", post(attach_audio_handler))
        .route("/{id}/audio/order", put(reorder_audio_handler))
        .route("/{id}/audio/{item_id}", axum::routing::delete(detach_audio_handler))
        .route("/{id}/videos", post(attach_video_handler))
        .route("/{id}/videos/order", put(reorder_videos_handler))
        .route("/{id}/videos/{item_id}", axum::routing::delete(detach_video_handler))
}

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pages_handler).post(create_page_handler))
        .route("/{slug}", get(get_page_handler))
}

pub fn series_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_series_handler))
        .route("/{slug}", get(get_series_handler).delete(delete_series_handler))
}
