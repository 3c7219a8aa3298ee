use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use crate::config::AppState;
use crate::content::media::MediaKind;
use crate::error::AppResult;
use crate::models::content_model::PageParams;
use crate::models::media_model::*;
use crate::services::collection_service::CollectionService;
use crate::services::media_service::MediaService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::current_site::CurrentSite;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn register_image_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterImageRequest>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let file = MediaService::register_image(&state.db, payload, now).await?;
    Ok(ResponseBuilder::created("IMAGE_REGISTERED", "Image registered", ImageResponse::new(&file, now)))
}

pub async fn list_images_handler(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let (page, limit) = params.resolve(state.config.page_size);
    let (files, meta) = MediaService::list_images(&state.db, page, limit).await?;

    let data: Vec<ImageResponse> = files.iter().map(|f| ImageResponse::new(f, now)).collect();
    Ok(ResponseBuilder::page("IMAGES_FETCHED", data, meta))
}

pub async fn delete_image_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    MediaService::delete_image(&state.db, id).await?;
    Ok(ResponseBuilder::done("IMAGE_DELETED", "Image deleted"))
}

pub async fn register_audio_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterAvRequest>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let file = MediaService::register_audio(&state.db, payload, now).await?;
    Ok(ResponseBuilder::created("AUDIO_REGISTERED", "Audio registered", AvResponse::from_audio(&file, now)))
}

pub async fn register_video_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterAvRequest>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let file = MediaService::register_video(&state.db, payload, now).await?;
    Ok(ResponseBuilder::created("VIDEO_REGISTERED", "Video registered", AvResponse::from_video(&file, now)))
}

pub async fn attach_image_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(article_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<AttachMediaRequest>,
) -> AppResult<impl IntoResponse> {
    let res = CollectionService::attach_image(&state.db, site.id, article_id, payload).await?;
    Ok(ResponseBuilder::created("IMAGE_ATTACHED", "Image attached", res))
}

pub async fn attach_audio_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(article_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<AttachMediaRequest>,
) -> AppResult<impl IntoResponse> {
    let res = CollectionService::attach_audio(&state.db, site.id, article_id, payload).await?;
    Ok(ResponseBuilder::created("AUDIO_ATTACHED", "Audio attached", res))
}

pub async fn attach_video_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(article_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<AttachMediaRequest>,
) -> AppResult<impl IntoResponse> {
    let res = CollectionService::attach_video(&state.db, site.id, article_id, payload).await?;
    Ok(ResponseBuilder::created("VIDEO_ATTACHED", "Video attached", res))
}

pub async fn update_image_item_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path((article_id, item_id)): Path<(i64, i64)>,
    ValidatedJson(payload): ValidatedJson<UpdateImageItemRequest>,
) -> AppResult<impl IntoResponse> {
    let res = CollectionService::update_image(&state.db, site.id, article_id, item_id, payload).await?;
    Ok(ResponseBuilder::success("IMAGE_ITEM_UPDATED", "Image item updated", res))
}

async fn detach(
    state: AppState,
    site_id: i64,
    kind: MediaKind,
    article_id: i64,
    item_id: i64,
) -> AppResult<impl IntoResponse> {
    CollectionService::detach(&state.db, site_id, kind, article_id, item_id).await?;
    Ok(ResponseBuilder::done("MEDIA_DETACHED", "Media detached"))
}

pub async fn detach_image_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path((article_id, item_id)): Path<(i64, i64)>,
) -> AppResult<impl IntoResponse> {
    detach(state, site.id, MediaKind::Image, article_id, item_id).await
}

pub async fn detach_audio_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path((article_id, item_id)): Path<(i64, i64)>,
) -> AppResult<impl IntoResponse> {
    detach(state, site.id, MediaKind::Audio, article_id, item_id).await
}

pub async fn detach_video_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path((article_id, item_id)): Path<(i64, i64)>,
) -> AppResult<impl IntoResponse> {
    detach(state, site.id, MediaKind::Video, article_id, item_id).await
}

async fn reorder(
    state: AppState,
    site_id: i64,
    kind: MediaKind,
    article_id: i64,
    payload: ReorderRequest,
) -> AppResult<impl IntoResponse> {
    CollectionService::reorder(&state.db, site_id, kind, article_id, &payload.items).await?;
    Ok(ResponseBuilder::done("MEDIA_REORDERED", "Collection reordered"))
}

pub async fn reorder_images_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(article_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    reorder(state, site.id, MediaKind::Image, article_id, payload).await
}

pub async fn reorder_audio_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(article_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    reorder(state, site.id, MediaKind::Audio, article_id, payload).await
}

pub async fn reorder_videos_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(article_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    reorder(state, site.id, MediaKind::Video, article_id, payload).await
}
