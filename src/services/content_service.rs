use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{sea_query::Expr, *};
use slug::slugify;

use crate::content::{
    liveness::{live, live_condition, OpenGraphEntity},
    site_context::SiteContext,
    LiveContent, SectionedArticle,
};
use crate::entities::{article, article_series, home_page, image_file, page, section, status::{ContentKind, ContentStatus}};
use crate::error::{AppError, AppResult};
use crate::models::content_model::*;
use crate::services::collection_service::CollectionService;
use crate::services::tag_service::TagService;
use crate::utils::api_response::PaginationMeta;

pub const OG_TYPE_WEBSITE: &str = "website";
pub const OG_TYPE_ARTICLE: &str = "article";

/// Request payload with defaults applied and references resolved.
struct ContentFields {
    title: String,
    slug: String,
    status: ContentStatus,
    description: String,
    body: String,
    og_image_id: Option<i64>,
    base_template: String,
    content_template: String,
    published_time: Option<DateTime<Utc>>,
    modified_time: Option<DateTime<Utc>>,
    expiration_time: Option<DateTime<Utc>>,
    author_display_name: String,
    author_profile_url: String,
    og_type: String,
    seo_title: String,
    seo_description: String,
    custom_copyright_notice: String,
    custom_icon: String,
    locale: String,
    tags: Vec<String>,
}

macro_rules! content_active_model {
    ($model:ident, $site_id:expr, $fields:ident $(, $extra:ident = $value:expr)* $(,)?) => {
        $model::ActiveModel {
            id: NotSet,
            site_id: Set($site_id),
            title: Set($fields.title),
            slug: Set($fields.slug),
            status: Set($fields.status),
            description: Set($fields.description),
            body: Set($fields.body),
            og_image_id: Set($fields.og_image_id),
            base_template: Set($fields.base_template),
            content_template: Set($fields.content_template),
            published_time: Set($fields.published_time),
            modified_time: Set($fields.modified_time),
            expiration_time: Set($fields.expiration_time),
            author_display_name: Set($fields.author_display_name),
            author_profile_url: Set($fields.author_profile_url),
            og_type: Set($fields.og_type),
            seo_title: Set($fields.seo_title),
            seo_description: Set($fields.seo_description),
            custom_copyright_notice: Set($fields.custom_copyright_notice),
            custom_icon: Set($fields.custom_icon),
            locale: Set($fields.locale),
            $($extra: Set($value),)*
        }
    };
}

pub struct ContentService;

impl ContentService {
    pub async fn create_section(
        db: &DatabaseConnection,
        site_id: i64,
        payload: CreateSectionRequest,
        default_locale: &str,
    ) -> AppResult<section::Model> {
        let txn = db.begin().await?;

        let mut fields = Self::resolve_fields(&txn, payload, OG_TYPE_WEBSITE, default_locale).await?;
        let tags = std::mem::take(&mut fields.tags);
        let saved = content_active_model!(section, site_id, fields)
            .insert(&txn)
            .await
            .map_err(|e| AppError::from_write(e, "Section"))?;
        TagService::set_tags(&txn, ContentKind::Section, saved.id, &tags).await?;

        txn.commit().await?;
        tracing::info!(site_id, slug = %saved.slug, "Section created");
        Ok(saved)
    }

    pub async fn create_page(
        db: &DatabaseConnection,
        site_id: i64,
        payload: CreatePageRequest,
        default_locale: &str,
    ) -> AppResult<page::Model> {
        let txn = db.begin().await?;

        let mut fields = Self::resolve_fields(&txn, payload, OG_TYPE_WEBSITE, default_locale).await?;
        let tags = std::mem::take(&mut fields.tags);
        let saved = content_active_model!(page, site_id, fields)
            .insert(&txn)
            .await
            .map_err(|e| AppError::from_write(e, "Page"))?;
        TagService::set_tags(&txn, ContentKind::Page, saved.id, &tags).await?;

        txn.commit().await?;
        tracing::info!(site_id, slug = %saved.slug, "Page created");
        Ok(saved)
    }

    pub async fn create_home_page(
        db: &DatabaseConnection,
        site_id: i64,
        payload: CreateHomePageRequest,
        default_locale: &str,
    ) -> AppResult<home_page::Model> {
        let txn = db.begin().await?;

        let admin_name = payload.admin_name;
        let mut fields = Self::resolve_fields(&txn, payload.content, OG_TYPE_WEBSITE, default_locale).await?;
        let tags = std::mem::take(&mut fields.tags);
        let saved = content_active_model!(home_page, site_id, fields, admin_name = admin_name)
            .insert(&txn)
            .await
            .map_err(|e| AppError::from_write(e, "Home page"))?;
        TagService::set_tags(&txn, ContentKind::HomePage, saved.id, &tags).await?;

        txn.commit().await?;
        tracing::info!(site_id, admin_name = %saved.admin_name, "Home page created");
        Ok(saved)
    }

    pub async fn create_article(
        db: &DatabaseConnection,
        site_id: i64,
        payload: CreateArticleRequest,
        default_locale: &str,
    ) -> AppResult<SectionedArticle> {
        let txn = db.begin().await?;

        let section = section::Entity::find()
            .filter(section::Column::SiteId.eq(site_id))
            .filter(section::Column::Slug.eq(&payload.section))
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound("Section"))?;

        let series_id = match &payload.series {
            Some(slug) => Some(Self::find_series(&txn, site_id, slug).await?.id),
            None => None,
        };
        let series_order = payload.series_order.unwrap_or(0);

        let mut fields = Self::resolve_fields(&txn, payload.content, OG_TYPE_ARTICLE, default_locale).await?;
        let tags = std::mem::take(&mut fields.tags);
        let saved = content_active_model!(
            article,
            site_id,
            fields,
            section_id = section.id,
            series_id = series_id,
            series_order = series_order,
        )
        .insert(&txn)
        .await
        .map_err(|e| AppError::from_write(e, "Article"))?;
        TagService::set_tags(&txn, ContentKind::Article, saved.id, &tags).await?;

        txn.commit().await?;
        tracing::info!(site_id, section = %section.slug, slug = %saved.slug, "Article created");
        Ok(SectionedArticle { article: saved, section })
    }

    /// One page of live items of any content table, newest first.
    pub async fn list_live<E>(
        db: &DatabaseConnection,
        site_id: i64,
        now: DateTime<Utc>,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<E::Model>, PaginationMeta)>
    where
        E: OpenGraphEntity,
        E::Model: Send + Sync,
    {
        Self::fetch_page(db, live::<E>(site_id, now), page, limit).await
    }

    pub async fn fetch_page<E>(
        db: &DatabaseConnection,
        select: Select<E>,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<E::Model>, PaginationMeta)>
    where
        E: EntityTrait,
        E::Model: Send + Sync,
    {
        let page = page.max(1);
        let limit = limit.max(1);

        let paginator = select.paginate(db, limit);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page - 1).await?;

        Ok((items, PaginationMeta::new(total, page, limit)))
    }

    pub async fn get_section(
        db: &DatabaseConnection,
        site_id: i64,
        slug: &str,
        now: DateTime<Utc>,
    ) -> AppResult<section::Model> {
        live::<section::Entity>(site_id, now)
            .filter(section::Column::Slug.eq(slug))
            .one(db)
            .await?
            .ok_or(AppError::NotFound("Section"))
    }

    pub async fn get_page(
        db: &DatabaseConnection,
        site_id: i64,
        slug: &str,
        now: DateTime<Utc>,
    ) -> AppResult<page::Model> {
        live::<page::Entity>(site_id, now)
            .filter(page::Column::Slug.eq(slug))
            .one(db)
            .await?
            .ok_or(AppError::NotFound("Page"))
    }

    pub async fn get_article(
        db: &DatabaseConnection,
        site_id: i64,
        section_slug: &str,
        slug: &str,
        now: DateTime<Utc>,
    ) -> AppResult<SectionedArticle> {
        let found = live::<article::Entity>(site_id, now)
            .filter(article::Column::Slug.eq(slug))
            .find_also_related(section::Entity)
            .filter(section::Column::Slug.eq(section_slug))
            .one(db)
            .await?;

        match found {
            Some((article, Some(section))) => Ok(SectionedArticle { article, section }),
            _ => Err(AppError::NotFound("Article")),
        }
    }

    /// Live articles of a live section, newest first.
    pub async fn list_section_articles(
        db: &DatabaseConnection,
        site_id: i64,
        section_slug: &str,
        now: DateTime<Utc>,
        page: u64,
        limit: u64,
    ) -> AppResult<(section::Model, Vec<article::Model>, PaginationMeta)> {
        let section = Self::get_section(db, site_id, section_slug, now).await?;
        let select = live::<article::Entity>(site_id, now).filter(article::Column::SectionId.eq(section.id));
        let (articles, meta) = Self::fetch_page(db, select, page, limit).await?;
        Ok((section, articles, meta))
    }

    /// Newest live home page. Several may exist; older ones are shadowed.
    pub async fn latest_home_page(
        db: &DatabaseConnection,
        site_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<home_page::Model>> {
        Ok(live::<home_page::Entity>(site_id, now).one(db).await?)
    }

    /// Remove a section that no longer files any article, with its tags.
    pub async fn delete_section(db: &DatabaseConnection, site_id: i64, slug: &str) -> AppResult<()> {
        let txn = db.begin().await?;

        let section = section::Entity::find()
            .filter(section::Column::SiteId.eq(site_id))
            .filter(section::Column::Slug.eq(slug))
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound("Section"))?;

        let articles = article::Entity::find()
            .filter(article::Column::SectionId.eq(section.id))
            .count(&txn)
            .await?;
        if articles > 0 {
            return Err(AppError::Protected(format!(
                "Section '{}' still has {} article(s)",
                section.slug, articles
            )));
        }

        TagService::set_tags(&txn, ContentKind::Section, section.id, &[]).await?;
        section::Entity::delete_by_id(section.id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::from_write(e, "Section"))?;

        txn.commit().await?;
        tracing::info!(site_id, slug, "Section deleted");
        Ok(())
    }

    pub async fn create_series(
        db: &DatabaseConnection,
        site_id: i64,
        payload: CreateSeriesRequest,
    ) -> AppResult<article_series::Model> {
        let slug = derive_slug(payload.slug, &payload.name)?;

        let saved = article_series::ActiveModel {
            id: NotSet,
            site_id: Set(site_id),
            name: Set(payload.name),
            slug: Set(slug),
            description: Set(payload.description),
        }
        .insert(db)
        .await
        .map_err(|e| AppError::from_write(e, "Series"))?;

        tracing::info!(site_id, slug = %saved.slug, "Series created");
        Ok(saved)
    }

    /// A series with its live articles in reading order.
    pub async fn get_series(
        db: &DatabaseConnection,
        site_id: i64,
        slug: &str,
        now: DateTime<Utc>,
    ) -> AppResult<(article_series::Model, Vec<SectionedArticle>)> {
        let series = Self::find_series(db, site_id, slug).await?;

        let rows = article::Entity::find()
            .filter(article::Column::SiteId.eq(site_id))
            .filter(article::Column::SeriesId.eq(series.id))
            .filter(live_condition::<article::Entity>(now))
            .order_by_asc(article::Column::SeriesOrder)
            .order_by_asc(article::Column::PublishedTime)
            .find_also_related(section::Entity)
            .all(db)
            .await?;

        let articles = rows
            .into_iter()
            .filter_map(|(article, section)| section.map(|section| SectionedArticle { article, section }))
            .collect();

        Ok((series, articles))
    }

    /// Delete a series. Its articles stay and lose their series reference.
    pub async fn delete_series(db: &DatabaseConnection, site_id: i64, slug: &str) -> AppResult<()> {
        let series = Self::find_series(db, site_id, slug).await?;

        let txn = db.begin().await?;
        let detached = article::Entity::update_many()
            .col_expr(article::Column::SeriesId, Expr::value(Option::<i64>::None))
            .filter(article::Column::SeriesId.eq(series.id))
            .exec(&txn)
            .await?;
        article_series::Entity::delete_by_id(series.id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(site_id, slug, detached = detached.rows_affected, "Series deleted");
        Ok(())
    }

    /// Template-ready representation of a content item.
    pub async fn render<T: LiveContent>(
        db: &DatabaseConnection,
        item: &T,
        ctx: &SiteContext,
        separator: &str,
        now: DateTime<Utc>,
    ) -> AppResult<ContentResponse> {
        let og_image = match item.base().og_image_id {
            Some(id) => image_file::Entity::find_by_id(id).one(db).await?,
            None => None,
        };
        let tags = TagService::names(db, T::KIND, item.id()).await?;

        Ok(ContentResponse::build(item, ctx, og_image.as_ref(), tags, separator, now))
    }

    /// Render a listing page. Tags and Open Graph images are fetched once
    /// for the whole page.
    pub async fn render_many<T: LiveContent>(
        db: &DatabaseConnection,
        items: &[T],
        ctx: &SiteContext,
        separator: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<ContentResponse>> {
        let ids: Vec<i64> = items.iter().map(|item| item.id()).collect();
        let mut tags = TagService::names_by_object(db, T::KIND, &ids).await?;

        let image_ids: Vec<i64> = items.iter().filter_map(|item| item.base().og_image_id).collect();
        let images: HashMap<i64, image_file::Model> = if image_ids.is_empty() {
            HashMap::new()
        } else {
            image_file::Entity::find()
                .filter(image_file::Column::Id.is_in(image_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|image| (image.id, image))
                .collect()
        };

        Ok(items
            .iter()
            .map(|item| {
                let og_image = item.base().og_image_id.and_then(|id| images.get(&id));
                let item_tags = tags.remove(&item.id()).unwrap_or_default();
                ContentResponse::build(item, ctx, og_image, item_tags, separator, now)
            })
            .collect())
    }

    pub async fn render_article(
        db: &DatabaseConnection,
        item: &SectionedArticle,
        ctx: &SiteContext,
        separator: &str,
        now: DateTime<Utc>,
    ) -> AppResult<ArticleResponse> {
        let mut content = Self::render(db, item, ctx, separator, now).await?;
        content.section = Some(SectionSummary::new(&item.section, ctx));
        if let Some(series_id) = item.article.series_id {
            let series = article_series::Entity::find_by_id(series_id).one(db).await?;
            content.series = series.as_ref().map(SeriesSummary::from);
        }

        let article_id = item.article.id;
        Ok(ArticleResponse {
            content,
            images: CollectionService::image_items(db, article_id).await?,
            audio: CollectionService::audio_items(db, article_id).await?,
            videos: CollectionService::video_items(db, article_id).await?,
        })
    }

    async fn find_series<C>(db: &C, site_id: i64, slug: &str) -> AppResult<article_series::Model>
    where
        C: ConnectionTrait,
    {
        article_series::Entity::find()
            .filter(article_series::Column::SiteId.eq(site_id))
            .filter(article_series::Column::Slug.eq(slug))
            .one(db)
            .await?
            .ok_or(AppError::NotFound("Series"))
    }

    async fn resolve_fields<C>(
        db: &C,
        payload: ContentPayload,
        default_og_type: &str,
        default_locale: &str,
    ) -> AppResult<ContentFields>
    where
        C: ConnectionTrait,
    {
        let slug = derive_slug(payload.slug, &payload.title)?;

        let og_image_id = match payload.og_image {
            Some(public_id) => Some(
                image_file::Entity::find()
                    .filter(image_file::Column::PublicId.eq(public_id))
                    .one(db)
                    .await?
                    .ok_or(AppError::NotFound("Image"))?
                    .id,
            ),
            None => None,
        };

        Ok(ContentFields {
            title: payload.title,
            slug,
            status: payload.status,
            description: payload.description,
            body: payload.body,
            og_image_id,
            base_template: payload.base_template,
            content_template: payload.content_template,
            published_time: payload.published_time,
            modified_time: payload.modified_time,
            expiration_time: payload.expiration_time,
            author_display_name: payload.author_display_name,
            author_profile_url: payload.author_profile_url,
            og_type: non_empty(payload.og_type).unwrap_or_else(|| default_og_type.to_string()),
            seo_title: payload.seo_title,
            seo_description: payload.seo_description,
            custom_copyright_notice: payload.custom_copyright_notice,
            custom_icon: payload.custom_icon,
            locale: non_empty(payload.locale).unwrap_or_else(|| default_locale.to_string()),
            tags: payload.tags,
        })
    }
}

/// Explicit slug, or one derived from `source`.
fn derive_slug(explicit: Option<String>, source: &str) -> AppResult<String> {
    let slug = non_empty(explicit).unwrap_or_else(|| slugify(source));
    if slug.is_empty() {
        return Err(AppError::Validation(format!("Cannot derive a slug from '{}'", source)));
    }
    Ok(slug)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::opengraph::OpenGraphObject;
    use crate::entities::content_tag;
    use crate::test_utils::{create_image, create_site, setup_db};
    use chrono::{Duration, TimeZone};
    use serde_json::json;
    use std::collections::HashMap;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn payload(value: serde_json::Value) -> ContentPayload {
        serde_json::from_value(value).unwrap()
    }

    fn article_request(section: &str, value: serde_json::Value) -> CreateArticleRequest {
        let mut value = value;
        value["section"] = json!(section);
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn live_listing_hides_unpublished_withheld_and_expired() {
        let (db, _dir) = setup_db().await;
        let site = create_site(&db, "example.com", "Example").await;
        let now = now();

        let cases = [
            ("Old", json!({"title": "Old", "published_time": now - Duration::days(3)})),
            ("New", json!({"title": "New", "published_time": now - Duration::days(1)})),
            ("Draft", json!({"title": "Draft"})),
            ("Future", json!({"title": "Future", "published_time": now + Duration::days(1)})),
            ("Held", json!({"title": "Held", "status": "withheld", "published_time": now - Duration::days(1)})),
            (
                "Gone",
                json!({"title": "Gone", "published_time": now - Duration::days(5), "expiration_time": now}),
            ),
        ];
        for (_, value) in cases {
            ContentService::create_page(&db, site.id, payload(value), "en_US").await.unwrap();
        }

        let (pages, meta) = ContentService::list_live::<page::Entity>(&db, site.id, now, 1, 10).await.unwrap();
        let titles: Vec<_> = pages.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old"]);
        assert_eq!(meta.total, 2);

        assert!(ContentService::get_page(&db, site.id, "draft", now).await.is_err());
        assert_eq!(ContentService::get_page(&db, site.id, "old", now).await.unwrap().title, "Old");
    }

    #[tokio::test]
    async fn slugs_are_unique_per_site_and_section() {
        let (db, _dir) = setup_db().await;
        let site = create_site(&db, "example.com", "Example").await;
        let other = create_site(&db, "other.example", "Other").await;

        for slug in ["news", "blog"] {
            ContentService::create_section(&db, site.id, payload(json!({"title": slug})), "en_US")
                .await
                .unwrap();
        }
        let dup = ContentService::create_section(&db, site.id, payload(json!({"title": "News"})), "en_US").await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));
        ContentService::create_section(&db, other.id, payload(json!({"title": "News"})), "en_US")
            .await
            .expect("same slug on another site");

        let first = ContentService::create_article(&db, site.id, article_request("news", json!({"title": "Hello"})), "en_US")
            .await
            .unwrap();
        assert_eq!(first.article.og_type, OG_TYPE_ARTICLE);
        assert_eq!(first.article.slug, "hello");

        let dup = ContentService::create_article(&db, site.id, article_request("news", json!({"title": "Hello"})), "en_US").await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));

        ContentService::create_article(&db, site.id, article_request("blog", json!({"title": "Hello"})), "en_US")
            .await
            .expect("same slug under another section");

        ContentService::create_page(&db, site.id, payload(json!({"title": "About", "slug": "about"})), "en_US")
            .await
            .unwrap();
        let dup = ContentService::create_page(&db, site.id, payload(json!({"title": "About us", "slug": "about"})), "en_US").await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));

        let missing = ContentService::create_article(&db, site.id, article_request("sports", json!({"title": "Hi"})), "en_US").await;
        assert!(matches!(missing, Err(AppError::NotFound("Section"))));
    }

    #[tokio::test]
    async fn sections_with_articles_cannot_be_deleted() {
        let (db, _dir) = setup_db().await;
        let site = create_site(&db, "example.com", "Example").await;

        ContentService::create_section(&db, site.id, payload(json!({"title": "News"})), "en_US").await.unwrap();
        let empty = ContentService::create_section(&db, site.id, payload(json!({"title": "Empty", "tags": ["x", "y"]})), "en_US")
            .await
            .unwrap();
        ContentService::create_article(&db, site.id, article_request("news", json!({"title": "Hello"})), "en_US")
            .await
            .unwrap();

        let err = ContentService::delete_section(&db, site.id, "news").await.unwrap_err();
        assert!(matches!(err, AppError::Protected(_)));

        ContentService::delete_section(&db, site.id, "empty").await.unwrap();
        assert_eq!(section::Entity::find().count(&db).await.unwrap(), 1);

        let leftover_tags = content_tag::Entity::find()
            .filter(content_tag::Column::ContentKind.eq(ContentKind::Section))
            .filter(content_tag::Column::ObjectId.eq(empty.id))
            .count(&db)
            .await
            .unwrap();
        assert_eq!(leftover_tags, 0);

        let missing = ContentService::delete_section(&db, site.id, "empty").await;
        assert!(matches!(missing, Err(AppError::NotFound("Section"))));
    }

    #[tokio::test]
    async fn home_page_slugs_are_unique_per_site() {
        let (db, _dir) = setup_db().await;
        let site = create_site(&db, "example.com", "Example").await;
        let other = create_site(&db, "other.example", "Other").await;

        let home = |admin_name: &str| -> CreateHomePageRequest {
            serde_json::from_value(json!({"admin_name": admin_name, "title": "Welcome", "slug": "home"})).unwrap()
        };

        ContentService::create_home_page(&db, site.id, home("a"), "en_US").await.unwrap();
        let dup = ContentService::create_home_page(&db, site.id, home("b"), "en_US").await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));

        ContentService::create_home_page(&db, other.id, home("c"), "en_US")
            .await
            .expect("same slug on another site");
    }

    #[tokio::test]
    async fn listing_render_batches_tags_and_images() {
        let (db, _dir) = setup_db().await;
        let site = create_site(&db, "example.com", "Example").await;
        let now = now();
        let image = create_image(&db, "banner", now).await;
        let published = now - Duration::days(1);

        for value in [
            json!({"title": "About", "published_time": published, "tags": ["Team", "Company"], "og_image": image.public_id}),
            json!({"title": "Contact", "published_time": published - Duration::days(1)}),
        ] {
            ContentService::create_page(&db, site.id, payload(value), "en_US").await.unwrap();
        }

        let (pages, _) = ContentService::list_live::<page::Entity>(&db, site.id, now, 1, 10).await.unwrap();
        let ctx = SiteContext::new(site, HashMap::new());
        let rendered = ContentService::render_many(&db, &pages, &ctx, "<!-- pagebreak -->", now).await.unwrap();

        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].url, "https://example.com/pages/about/");
        assert_eq!(rendered[0].tags, vec!["Company", "Team"]);
        assert_eq!(rendered[0].opengraph.base().image[0].url, image.url);
        assert!(rendered[1].tags.is_empty());

        let single = ContentService::render(&db, &pages[0], &ctx, "<!-- pagebreak -->", now).await.unwrap();
        assert_eq!(single.tags, rendered[0].tags);
    }

    #[tokio::test]
    async fn deleting_a_series_keeps_its_articles() {
        let (db, _dir) = setup_db().await;
        let site = create_site(&db, "example.com", "Example").await;
        let now = now();
        let published = now - Duration::hours(1);

        ContentService::create_section(&db, site.id, payload(json!({"title": "News"})), "en_US").await.unwrap();
        let series: CreateSeriesRequest = serde_json::from_value(json!({"name": "Rust basics"})).unwrap();
        let series = ContentService::create_series(&db, site.id, series).await.unwrap();
        assert_eq!(series.slug, "rust-basics");

        for (title, order) in [("Part two", 2), ("Part one", 1)] {
            let req = article_request(
                "news",
                json!({"title": title, "series": "rust-basics", "series_order": order, "published_time": published}),
            );
            ContentService::create_article(&db, site.id, req, "en_US").await.unwrap();
        }

        let (_, articles) = ContentService::get_series(&db, site.id, "rust-basics", now).await.unwrap();
        let titles: Vec<_> = articles.iter().map(|a| a.article.title.as_str()).collect();
        assert_eq!(titles, vec!["Part one", "Part two"]);

        ContentService::delete_series(&db, site.id, "rust-basics").await.unwrap();
        let remaining = article::Entity::find().all(&db).await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|a| a.series_id.is_none()));
    }

    #[tokio::test]
    async fn latest_live_home_page_wins() {
        let (db, _dir) = setup_db().await;
        let site = create_site(&db, "example.com", "Example").await;
        let now = now();

        assert!(ContentService::latest_home_page(&db, site.id, now).await.unwrap().is_none());

        for (admin_name, offset) in [("spring", 10), ("summer", 2), ("autumn", -1)] {
            let req: CreateHomePageRequest = serde_json::from_value(json!({
                "admin_name": admin_name,
                "title": "Welcome",
                "slug": admin_name,
                "published_time": now - Duration::days(offset),
            }))
            .unwrap();
            ContentService::create_home_page(&db, site.id, req, "en_US").await.unwrap();
        }

        let home = ContentService::latest_home_page(&db, site.id, now).await.unwrap().unwrap();
        assert_eq!(home.admin_name, "summer");
    }

    #[tokio::test]
    async fn rendered_article_carries_open_graph_article_data() {
        let (db, _dir) = setup_db().await;
        let site = create_site(&db, "example.com", "Example").await;
        let now = now();
        let image = create_image(&db, "cover", now).await;

        ContentService::create_section(&db, site.id, payload(json!({"title": "News"})), "en_US").await.unwrap();
        let req = article_request(
            "news",
            json!({
                "title": "Launch",
                "seo_title": "We launched",
                "body": "<p>intro</p><!-- pagebreak --><p>rest</p>",
                "published_time": now - Duration::days(1),
                "author_profile_url": "https://example.com/team/ada/",
                "og_image": image.public_id,
                "tags": ["Release", "Announcements"],
            }),
        );
        ContentService::create_article(&db, site.id, req, "de_DE").await.unwrap();

        let item = ContentService::get_article(&db, site.id, "news", "launch", now).await.unwrap();
        let ctx = SiteContext::new(site, HashMap::new());
        let rendered = ContentService::render_article(&db, &item, &ctx, "<!-- pagebreak -->", now)
            .await
            .unwrap();

        assert_eq!(rendered.content.url, "https://example.com/news/launch/");
        assert_eq!(rendered.content.excerpt, "<p>intro</p>");
        assert_eq!(rendered.content.tags, vec!["Announcements", "Release"]);
        assert_eq!(rendered.content.copyright_notice, "© Copyright 2024 Example. All rights reserved.");

        let OpenGraphObject::Article(og) = &rendered.content.opengraph else {
            panic!("articles render as og:article");
        };
        assert_eq!(og.base.title, "We launched");
        assert_eq!(og.base.locale, "de_DE");
        assert_eq!(og.base.image[0].url, image.url);
        assert_eq!(og.section.as_deref(), Some("News"));
        assert_eq!(og.author, vec!["https://example.com/team/ada/".to_string()]);

        assert!(ContentService::get_article(&db, ctx.site.id, "other", "launch", now).await.is_err());
    }
}
