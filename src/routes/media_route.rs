use axum::{routing::{get, post, delete}, Router};
use crate::config::AppState;
use crate::handlers::media_handler::*;

pub fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/images", get(list_images_handler).post(register_image_handler))
        .route("/images/{id}", delete(delete_image_handler))
        .route("/audio", post(register_audio_handler))
        .route("/video", post(register_video_handler))
}
