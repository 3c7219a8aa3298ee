use chrono::{DateTime, Utc};
use sea_orm::*;
use std::path::Path;
use uuid::Uuid;

use crate::content::media::{resolve_date_taken, MediaKind};
use crate::entities::{article_image, audio_file, image_file, video_file};
use crate::error::{AppError, AppResult};
use crate::models::media_model::{RegisterAvRequest, RegisterImageRequest};
use crate::services::collection_service::CollectionService;
use crate::services::content_service::ContentService;
use crate::utils::api_response::PaginationMeta;

pub struct MediaService;

impl MediaService {
    /// Record an image that is already in storage.
    pub async fn register_image(
        db: &DatabaseConnection,
        payload: RegisterImageRequest,
        now: DateTime<Utc>,
    ) -> AppResult<image_file::Model> {
        Self::expect_kind(&payload.mime_type, MediaKind::Image)?;

        let date_taken = resolve_date_taken(payload.date_taken, payload.exif_date_time_original.as_deref(), now);
        let name = default_name(payload.name, &payload.url);

        let saved = image_file::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            name: Set(name),
            url: Set(payload.url),
            description: Set(payload.description),
            default_alt_text: Set(payload.default_alt_text),
            width: Set(payload.width),
            height: Set(payload.height),
            mime_type: Set(payload.mime_type),
            size: Set(payload.size),
            date_taken: Set(Some(date_taken)),
            uploaded_at: Set(now),
            custom_copyright_notice: Set(payload.custom_copyright_notice),
        }
        .insert(db)
        .await
        .map_err(|e| AppError::from_write(e, "Image"))?;

        tracing::info!(public_id = %saved.public_id, url = %saved.url, "Image registered");
        Ok(saved)
    }

    pub async fn register_audio(
        db: &DatabaseConnection,
        payload: RegisterAvRequest,
        now: DateTime<Utc>,
    ) -> AppResult<audio_file::Model> {
        Self::expect_kind(&payload.mime_type, MediaKind::Audio)?;

        let saved = audio_file::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            name: Set(default_name(payload.name, &payload.url)),
            url: Set(payload.url),
            description: Set(payload.description),
            duration: Set(payload.duration),
            mime_type: Set(payload.mime_type),
            size: Set(payload.size),
            published_time: Set(payload.published_time),
            uploaded_at: Set(now),
            custom_copyright_notice: Set(payload.custom_copyright_notice),
        }
        .insert(db)
        .await
        .map_err(|e| AppError::from_write(e, "Audio file"))?;

        tracing::info!(public_id = %saved.public_id, url = %saved.url, "Audio registered");
        Ok(saved)
    }

    pub async fn register_video(
        db: &DatabaseConnection,
        payload: RegisterAvRequest,
        now: DateTime<Utc>,
    ) -> AppResult<video_file::Model> {
        Self::expect_kind(&payload.mime_type, MediaKind::Video)?;

        let saved = video_file::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            name: Set(default_name(payload.name, &payload.url)),
            url: Set(payload.url),
            description: Set(payload.description),
            width: Set(payload.width),
            height: Set(payload.height),
            duration: Set(payload.duration),
            mime_type: Set(payload.mime_type),
            size: Set(payload.size),
            published_time: Set(payload.published_time),
            uploaded_at: Set(now),
            custom_copyright_notice: Set(payload.custom_copyright_notice),
        }
        .insert(db)
        .await
        .map_err(|e| AppError::from_write(e, "Video file"))?;

        tracing::info!(public_id = %saved.public_id, url = %saved.url, "Video registered");
        Ok(saved)
    }

    pub async fn list_images(
        db: &DatabaseConnection,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<image_file::Model>, PaginationMeta)> {
        let select = image_file::Entity::find()
            .order_by_desc(image_file::Column::UploadedAt)
            .order_by_desc(image_file::Column::Id);
        ContentService::fetch_page(db, select, page, limit).await
    }

    pub async fn find_image<C: ConnectionTrait>(db: &C, public_id: Uuid) -> AppResult<image_file::Model> {
        image_file::Entity::find()
            .filter(image_file::Column::PublicId.eq(public_id))
            .one(db)
            .await?
            .ok_or(AppError::NotFound("Image"))
    }

    pub async fn find_audio<C: ConnectionTrait>(db: &C, public_id: Uuid) -> AppResult<audio_file::Model> {
        audio_file::Entity::find()
            .filter(audio_file::Column::PublicId.eq(public_id))
            .one(db)
            .await?
            .ok_or(AppError::NotFound("Audio file"))
    }

    pub async fn find_video<C: ConnectionTrait>(db: &C, public_id: Uuid) -> AppResult<video_file::Model> {
        video_file::Entity::find()
            .filter(video_file::Column::PublicId.eq(public_id))
            .one(db)
            .await?
            .ok_or(AppError::NotFound("Video file"))
    }

    /// Delete an image record. Collection entries go with it; articles that
    /// showed it get their representative image recomputed.
    pub async fn delete_image(db: &DatabaseConnection, public_id: Uuid) -> AppResult<()> {
        let image = Self::find_image(db, public_id).await?;

        let affected: Vec<i64> = article_image::Entity::find()
            .select_only()
            .column(article_image::Column::ArticleId)
            .filter(article_image::Column::ImageFileId.eq(image.id))
            .distinct()
            .into_tuple()
            .all(db)
            .await?;

        image_file::Entity::delete_by_id(image.id)
            .exec(db)
            .await
            .map_err(|e| AppError::from_write(e, "Image"))?;

        for article_id in affected {
            CollectionService::reindex_og_image(db, article_id).await?;
        }

        tracing::info!(%public_id, "Image deleted");
        Ok(())
    }

    fn expect_kind(mime_type: &str, expected: MediaKind) -> AppResult<()> {
        match MediaKind::from_mime(mime_type) {
            Some(kind) if kind == expected => Ok(()),
            _ => Err(AppError::Validation(format!(
                "'{}' is not a supported {:?} type",
                mime_type, expected
            ))),
        }
    }
}

/// Name from the request, else the file stem of the URL.
fn default_name(name: String, url: &str) -> String {
    if !name.trim().is_empty() {
        return name;
    }
    let path = url.split(['?', '#']).next().unwrap_or_default();
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_db;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn default_name_ignores_query_and_fragment() {
        assert_eq!(default_name(String::new(), "https://cdn.example.com/img/sunset.jpg?v=2"), "sunset");
        assert_eq!(default_name(String::new(), "https://cdn.example.com/talk.mp3#t=30"), "talk");
        assert_eq!(default_name(String::new(), "https://cdn.example.com/clip.mp4"), "clip");
        assert_eq!(default_name("Cover".into(), "https://cdn.example.com/a.png?x"), "Cover");
    }

    #[tokio::test]
    async fn image_capture_date_comes_from_exif_or_upload_time() {
        let (db, _dir) = setup_db().await;

        let from_exif: RegisterImageRequest = serde_json::from_value(json!({
            "url": "https://cdn.example.com/photos/harbour.jpg",
            "mime_type": "image/jpeg",
            "exif_date_time_original": "2019:08:17 14:05:09",
        }))
        .unwrap();
        let saved = MediaService::register_image(&db, from_exif, now()).await.unwrap();
        assert_eq!(saved.name, "harbour");
        assert_eq!(saved.date_taken, Some(Utc.with_ymd_and_hms(2019, 8, 17, 14, 5, 9).unwrap()));

        let broken: RegisterImageRequest = serde_json::from_value(json!({
            "name": "Broken",
            "url": "https://cdn.example.com/b.jpg",
            "mime_type": "image/jpeg",
            "exif_date_time_original": "yesterday",
        }))
        .unwrap();
        let saved = MediaService::register_image(&db, broken, now()).await.unwrap();
        assert_eq!(saved.date_taken, Some(now()));

        let (images, meta) = MediaService::list_images(&db, 1, 10).await.unwrap();
        assert_eq!(meta.total, 2);
        assert_eq!(images[0].name, "Broken");
    }

    #[tokio::test]
    async fn av_registration_checks_mime_type() {
        let (db, _dir) = setup_db().await;
        let request = |mime: &str| -> RegisterAvRequest {
            serde_json::from_value(json!({"url": "https://cdn.example.com/a", "mime_type": mime})).unwrap()
        };

        MediaService::register_audio(&db, request("audio/mpeg"), now()).await.unwrap();
        MediaService::register_video(&db, request("video/mp4"), now()).await.unwrap();

        let err = MediaService::register_audio(&db, request("video/mp4"), now()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = MediaService::register_video(&db, request("image/png"), now()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
