use sea_orm::{sea_query::Expr, *};

use crate::content::media::{AudioItem, ImageItem, MediaKind, VideoItem};
use crate::entities::{article, article_audio, article_image, article_video, audio_file, image_file, video_file};
use crate::error::{AppError, AppResult};
use crate::models::media_model::*;
use crate::services::media_service::MediaService;

/// Join tables that attach media files to an article in a fixed order.
pub trait ArticleCollection: EntityTrait {
    fn id_column() -> Self::Column;
    fn article_column() -> Self::Column;
    fn sort_order_column() -> Self::Column;
}

macro_rules! article_collection {
    ($($model:ident),+ $(,)?) => {$(
        impl ArticleCollection for $model::Entity {
            fn id_column() -> Self::Column {
                $model::Column::Id
            }
            fn article_column() -> Self::Column {
                $model::Column::ArticleId
            }
            fn sort_order_column() -> Self::Column {
                $model::Column::SortOrder
            }
        }
    )+};
}

article_collection!(article_image, article_audio, article_video);

pub struct CollectionService;

impl CollectionService {
    pub async fn attach_image(
        db: &DatabaseConnection,
        site_id: i64,
        article_id: i64,
        payload: AttachMediaRequest,
    ) -> AppResult<ImageItemResponse> {
        Self::find_article(db, site_id, article_id).await?;
        let file = MediaService::find_image(db, payload.file).await?;
        let sort_order = Self::next_sort_order::<article_image::Entity>(db, article_id).await?;

        let item = article_image::ActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            image_file_id: Set(file.id),
            contextual_title: Set(payload.contextual_title),
            contextual_alt_text: Set(payload.contextual_alt_text),
            contextual_description: Set(payload.contextual_description),
            sort_order: Set(sort_order),
        }
        .insert(db)
        .await
        .map_err(|e| AppError::from_write(e, "Image item"))?;

        Self::reindex_og_image(db, article_id).await?;
        tracing::info!(article_id, item_id = item.id, "Image attached");
        Ok(ImageItem { item: &item, file: &file }.into())
    }

    pub async fn attach_audio(
        db: &DatabaseConnection,
        site_id: i64,
        article_id: i64,
        payload: AttachMediaRequest,
    ) -> AppResult<AudioItemResponse> {
        Self::find_article(db, site_id, article_id).await?;
        let file = MediaService::find_audio(db, payload.file).await?;
        let sort_order = Self::next_sort_order::<article_audio::Entity>(db, article_id).await?;

        let item = article_audio::ActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            audio_file_id: Set(file.id),
            contextual_title: Set(payload.contextual_title),
            contextual_description: Set(payload.contextual_description),
            sort_order: Set(sort_order),
        }
        .insert(db)
        .await
        .map_err(|e| AppError::from_write(e, "Audio item"))?;

        tracing::info!(article_id, item_id = item.id, "Audio attached");
        Ok(AudioItem { item: &item, file: &file }.into())
    }

    pub async fn attach_video(
        db: &DatabaseConnection,
        site_id: i64,
        article_id: i64,
        payload: AttachMediaRequest,
    ) -> AppResult<VideoItemResponse> {
        Self::find_article(db, site_id, article_id).await?;
        let file = MediaService::find_video(db, payload.file).await?;
        let sort_order = Self::next_sort_order::<article_video::Entity>(db, article_id).await?;

        let item = article_video::ActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            video_file_id: Set(file.id),
            contextual_title: Set(payload.contextual_title),
            contextual_description: Set(payload.contextual_description),
            sort_order: Set(sort_order),
        }
        .insert(db)
        .await
        .map_err(|e| AppError::from_write(e, "Video item"))?;

        tracing::info!(article_id, item_id = item.id, "Video attached");
        Ok(VideoItem { item: &item, file: &file }.into())
    }

    /// Change the contextual text of an image item. Unset fields keep their value.
    pub async fn update_image(
        db: &DatabaseConnection,
        site_id: i64,
        article_id: i64,
        item_id: i64,
        payload: UpdateImageItemRequest,
    ) -> AppResult<ImageItemResponse> {
        Self::find_article(db, site_id, article_id).await?;
        let (item, file) = article_image::Entity::find_by_id(item_id)
            .filter(article_image::Column::ArticleId.eq(article_id))
            .find_also_related(image_file::Entity)
            .one(db)
            .await?
            .ok_or(AppError::NotFound("Image item"))?;
        let file = file.ok_or(AppError::NotFound("Image"))?;

        let mut active: article_image::ActiveModel = item.into();
        if let Some(title) = payload.contextual_title { active.contextual_title = Set(title); }
        if let Some(alt) = payload.contextual_alt_text { active.contextual_alt_text = Set(alt); }
        if let Some(desc) = payload.contextual_description { active.contextual_description = Set(desc); }
        let item = active.update(db).await?;

        Self::reindex_og_image(db, article_id).await?;
        Ok(ImageItem { item: &item, file: &file }.into())
    }

    pub async fn detach(
        db: &DatabaseConnection,
        site_id: i64,
        kind: MediaKind,
        article_id: i64,
        item_id: i64,
    ) -> AppResult<()> {
        Self::find_article(db, site_id, article_id).await?;
        match kind {
            MediaKind::Image => {
                Self::delete_item::<article_image::Entity>(db, article_id, item_id).await?;
                Self::reindex_og_image(db, article_id).await?;
            }
            MediaKind::Audio => Self::delete_item::<article_audio::Entity>(db, article_id, item_id).await?,
            MediaKind::Video => Self::delete_item::<article_video::Entity>(db, article_id, item_id).await?,
        }
        tracing::info!(article_id, item_id, ?kind, "Media detached");
        Ok(())
    }

    /// Renumber a collection in the given order. `ids` must list every item
    /// of the collection exactly once.
    pub async fn reorder(
        db: &DatabaseConnection,
        site_id: i64,
        kind: MediaKind,
        article_id: i64,
        ids: &[i64],
    ) -> AppResult<()> {
        Self::find_article(db, site_id, article_id).await?;
        match kind {
            MediaKind::Image => {
                Self::renumber::<article_image::Entity>(db, article_id, ids).await?;
                Self::reindex_og_image(db, article_id).await?;
            }
            MediaKind::Audio => Self::renumber::<article_audio::Entity>(db, article_id, ids).await?,
            MediaKind::Video => Self::renumber::<article_video::Entity>(db, article_id, ids).await?,
        }
        Ok(())
    }

    /// Point the article's og_image at the first gallery image. Runs outside
    /// the write that changed the gallery; concurrent callers race and the
    /// last write wins. An empty gallery leaves og_image alone.
    ///
    /// Returns whether the article was updated.
    pub async fn reindex_og_image<C>(db: &C, article_id: i64) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        let first = article_image::Entity::find()
            .filter(article_image::Column::ArticleId.eq(article_id))
            .order_by_asc(article_image::Column::SortOrder)
            .order_by_asc(article_image::Column::Id)
            .one(db)
            .await?;
        let Some(first) = first else {
            return Ok(false);
        };

        let current: Option<Option<i64>> = article::Entity::find_by_id(article_id)
            .select_only()
            .column(article::Column::OgImageId)
            .into_tuple()
            .one(db)
            .await?;
        if current.flatten() == Some(first.image_file_id) {
            return Ok(false);
        }

        // Only og_image_id is written so concurrent edits to other columns survive
        article::Entity::update_many()
            .col_expr(article::Column::OgImageId, Expr::value(first.image_file_id))
            .filter(article::Column::Id.eq(article_id))
            .exec(db)
            .await?;

        tracing::debug!(article_id, image_file_id = first.image_file_id, "Representative image updated");
        Ok(true)
    }

    pub async fn image_items<C: ConnectionTrait>(db: &C, article_id: i64) -> AppResult<Vec<ImageItemResponse>> {
        let rows = article_image::Entity::find()
            .filter(article_image::Column::ArticleId.eq(article_id))
            .order_by_asc(article_image::Column::SortOrder)
            .order_by_asc(article_image::Column::Id)
            .find_also_related(image_file::Entity)
            .all(db)
            .await?;

        Ok(rows
            .iter()
            .filter_map(|(item, file)| file.as_ref().map(|file| ImageItemResponse::from(ImageItem { item, file })))
            .collect())
    }

    pub async fn audio_items<C: ConnectionTrait>(db: &C, article_id: i64) -> AppResult<Vec<AudioItemResponse>> {
        let rows = article_audio::Entity::find()
            .filter(article_audio::Column::ArticleId.eq(article_id))
            .order_by_asc(article_audio::Column::SortOrder)
            .order_by_asc(article_audio::Column::Id)
            .find_also_related(audio_file::Entity)
            .all(db)
            .await?;

        Ok(rows
            .iter()
            .filter_map(|(item, file)| file.as_ref().map(|file| AudioItemResponse::from(AudioItem { item, file })))
            .collect())
    }

    pub async fn video_items<C: ConnectionTrait>(db: &C, article_id: i64) -> AppResult<Vec<VideoItemResponse>> {
        let rows = article_video::Entity::find()
            .filter(article_video::Column::ArticleId.eq(article_id))
            .order_by_asc(article_video::Column::SortOrder)
            .order_by_asc(article_video::Column::Id)
            .find_also_related(video_file::Entity)
            .all(db)
            .await?;

        Ok(rows
            .iter()
            .filter_map(|(item, file)| file.as_ref().map(|file| VideoItemResponse::from(VideoItem { item, file })))
            .collect())
    }

    async fn find_article(db: &DatabaseConnection, site_id: i64, article_id: i64) -> AppResult<article::Model> {
        article::Entity::find_by_id(article_id)
            .filter(article::Column::SiteId.eq(site_id))
            .one(db)
            .await?
            .ok_or(AppError::NotFound("Article"))
    }

    async fn next_sort_order<E: ArticleCollection>(db: &DatabaseConnection, article_id: i64) -> AppResult<i32> {
        let last: Option<i32> = E::find()
            .select_only()
            .column(E::sort_order_column())
            .filter(E::article_column().eq(article_id))
            .order_by_desc(E::sort_order_column())
            .into_tuple()
            .one(db)
            .await?;
        Ok(last.map_or(0, |order| order + 1))
    }

    async fn delete_item<E: ArticleCollection>(db: &DatabaseConnection, article_id: i64, item_id: i64) -> AppResult<()> {
        let result = E::delete_many()
            .filter(E::article_column().eq(article_id))
            .filter(E::id_column().eq(item_id))
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Collection item"));
        }
        Ok(())
    }

    async fn renumber<E: ArticleCollection>(db: &DatabaseConnection, article_id: i64, ids: &[i64]) -> AppResult<()> {
        let txn = db.begin().await?;

        let mut existing: Vec<i64> = E::find()
            .select_only()
            .column(E::id_column())
            .filter(E::article_column().eq(article_id))
            .into_tuple()
            .all(&txn)
            .await?;
        let mut requested = ids.to_vec();
        existing.sort_unstable();
        requested.sort_unstable();
        if existing != requested {
            return Err(AppError::Validation(
                "Item list must name every item of the collection once".to_string(),
            ));
        }

        for (position, id) in ids.iter().enumerate() {
            E::update_many()
                .col_expr(E::sort_order_column(), Expr::value(position as i32))
                .filter(E::id_column().eq(*id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content_model::{ContentPayload, CreateArticleRequest};
    use crate::services::content_service::ContentService;
    use crate::test_utils::{create_image, create_site, setup_db};
    use chrono::Utc;
    use serde_json::json;

    async fn article_with_site(db: &DatabaseConnection) -> (i64, i64) {
        let site = create_site(db, "example.com", "Example").await;
        let section: ContentPayload = serde_json::from_value(json!({"title": "News"})).unwrap();
        ContentService::create_section(db, site.id, section, "en_US").await.unwrap();
        let req: CreateArticleRequest =
            serde_json::from_value(json!({"section": "news", "title": "Gallery"})).unwrap();
        let created = ContentService::create_article(db, site.id, req, "en_US").await.unwrap();
        (site.id, created.article.id)
    }

    fn attach(file: uuid::Uuid) -> AttachMediaRequest {
        serde_json::from_value(json!({ "file": file })).unwrap()
    }

    async fn og_image_id(db: &DatabaseConnection, article_id: i64) -> Option<i64> {
        article::Entity::find_by_id(article_id).one(db).await.unwrap().unwrap().og_image_id
    }

    #[tokio::test]
    async fn first_gallery_image_becomes_representative() {
        let (db, _dir) = setup_db().await;
        let (site_id, article_id) = article_with_site(&db).await;
        let first = create_image(&db, "first", Utc::now()).await;
        let second = create_image(&db, "second", Utc::now()).await;

        assert_eq!(og_image_id(&db, article_id).await, None);

        let a = CollectionService::attach_image(&db, site_id, article_id, attach(first.public_id)).await.unwrap();
        assert_eq!(og_image_id(&db, article_id).await, Some(first.id));

        let b = CollectionService::attach_image(&db, site_id, article_id, attach(second.public_id)).await.unwrap();
        assert_eq!(b.sort_order, a.sort_order + 1);
        assert_eq!(og_image_id(&db, article_id).await, Some(first.id), "appending keeps the first image");

        CollectionService::reorder(&db, site_id, MediaKind::Image, article_id, &[b.id, a.id]).await.unwrap();
        assert_eq!(og_image_id(&db, article_id).await, Some(second.id));

        CollectionService::detach(&db, site_id, MediaKind::Image, article_id, b.id).await.unwrap();
        assert_eq!(og_image_id(&db, article_id).await, Some(first.id));

        CollectionService::detach(&db, site_id, MediaKind::Image, article_id, a.id).await.unwrap();
        assert_eq!(og_image_id(&db, article_id).await, Some(first.id), "empty gallery leaves og_image untouched");
    }

    #[tokio::test]
    async fn reindex_is_a_no_op_when_already_in_sync() {
        let (db, _dir) = setup_db().await;
        let (site_id, article_id) = article_with_site(&db).await;
        let image = create_image(&db, "only", Utc::now()).await;

        assert!(!CollectionService::reindex_og_image(&db, article_id).await.unwrap());
        CollectionService::attach_image(&db, site_id, article_id, attach(image.public_id)).await.unwrap();
        assert!(!CollectionService::reindex_og_image(&db, article_id).await.unwrap());
    }

    #[tokio::test]
    async fn contextual_text_overrides_file_metadata() {
        let (db, _dir) = setup_db().await;
        let (site_id, article_id) = article_with_site(&db).await;
        let image = create_image(&db, "harbour", Utc::now()).await;

        let item = CollectionService::attach_image(&db, site_id, article_id, attach(image.public_id)).await.unwrap();
        assert_eq!(item.title, "harbour");
        assert_eq!(item.alt_text, "harbour alt");

        let update: UpdateImageItemRequest =
            serde_json::from_value(json!({"contextual_alt_text": "Boats at dawn"})).unwrap();
        let updated = CollectionService::update_image(&db, site_id, article_id, item.id, update).await.unwrap();
        assert_eq!(updated.alt_text, "Boats at dawn");
        assert_eq!(updated.title, "harbour");

        let listed = CollectionService::image_items(&db, article_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].alt_text, "Boats at dawn");
    }

    #[tokio::test]
    async fn reorder_rejects_partial_lists() {
        let (db, _dir) = setup_db().await;
        let (site_id, article_id) = article_with_site(&db).await;
        let one = create_image(&db, "one", Utc::now()).await;
        let two = create_image(&db, "two", Utc::now()).await;

        let a = CollectionService::attach_image(&db, site_id, article_id, attach(one.public_id)).await.unwrap();
        CollectionService::attach_image(&db, site_id, article_id, attach(two.public_id)).await.unwrap();

        let err = CollectionService::reorder(&db, site_id, MediaKind::Image, article_id, &[a.id])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn media_of_other_sites_is_not_reachable() {
        let (db, _dir) = setup_db().await;
        let (_, article_id) = article_with_site(&db).await;
        let other = create_site(&db, "other.example", "Other").await;
        let image = create_image(&db, "x", Utc::now()).await;

        let err = CollectionService::attach_image(&db, other.id, article_id, attach(image.public_id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound("Article")));
    }
}
