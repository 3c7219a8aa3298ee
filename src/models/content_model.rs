use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::content::{opengraph::OpenGraphObject, site_context::SiteContext, LiveContent};
use crate::entities::{article_series, image_file, section, status::{ContentKind, ContentStatus}};
use crate::models::media_model::{AudioItemResponse, ImageItemResponse, VideoItemResponse};
use crate::utils::validator_utils::validate_slug;

/// Fields every content type accepts on creation.
#[derive(Deserialize, Validate)]
pub struct ContentPayload {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    /// Derived from the title when omitted.
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[serde(default)]
    pub status: ContentStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body: String,
    pub published_time: Option<DateTime<Utc>>,
    pub modified_time: Option<DateTime<Utc>>,
    pub expiration_time: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub author_display_name: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub author_profile_url: String,
    /// Open Graph type; defaults per content type.
    pub og_type: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub seo_title: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub seo_description: String,
    #[serde(default)]
    pub custom_copyright_notice: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub custom_icon: String,
    pub locale: Option<String>,
    /// Public id of an uploaded image.
    pub og_image: Option<Uuid>,
    #[serde(default)]
    pub base_template: String,
    #[serde(default)]
    pub content_template: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub type CreateSectionRequest = ContentPayload;
pub type CreatePageRequest = ContentPayload;

#[derive(Deserialize, Validate)]
pub struct CreateHomePageRequest {
    #[validate(length(min = 1, max = 255, message = "Admin name is required"))]
    pub admin_name: String,
    #[serde(flatten)]
    #[validate(nested)]
    pub content: ContentPayload,
}

#[derive(Deserialize, Validate)]
pub struct CreateArticleRequest {
    /// Slug of the section the article is filed under.
    #[validate(custom(function = "validate_slug"))]
    pub section: String,
    /// Slug of an existing series.
    pub series: Option<String>,
    pub series_order: Option<i32>,
    #[serde(flatten)]
    #[validate(nested)]
    pub content: ContentPayload,
}

#[derive(Deserialize, Validate)]
pub struct CreateSeriesRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

pub const MAX_PAGE_SIZE: u64 = 100;

impl PageParams {
    /// `(page, limit)` with defaults applied and the limit capped.
    pub fn resolve(&self, default_limit: u64) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_SIZE);
        (page, limit)
    }
}

#[derive(Debug, Serialize)]
pub struct SectionSummary {
    pub title: String,
    pub slug: String,
    pub url: String,
}

impl SectionSummary {
    pub fn new(section: &section::Model, ctx: &SiteContext) -> Self {
        Self {
            title: section.title.clone(),
            slug: section.slug.clone(),
            url: section.url(ctx),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SeriesSummary {
    pub name: String,
    pub slug: String,
}

impl From<&article_series::Model> for SeriesSummary {
    fn from(series: &article_series::Model) -> Self {
        Self { name: series.name.clone(), slug: series.slug.clone() }
    }
}

#[derive(Debug, Serialize)]
pub struct MetaTag {
    pub property: String,
    pub content: String,
}

/// Everything a template needs to render one content item.
#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub id: i64,
    pub kind: ContentKind,
    pub title: String,
    pub slug: String,
    pub url: String,
    pub status: ContentStatus,
    pub is_live: bool,
    pub description: String,
    pub body: String,
    pub excerpt: String,
    pub icon_name: String,
    pub copyright_notice: String,
    pub published_time: Option<DateTime<Utc>>,
    pub modified_time: Option<DateTime<Utc>>,
    pub expiration_time: Option<DateTime<Utc>>,
    pub author_display_name: String,
    pub author_profile_url: String,
    pub locale: String,
    pub tags: Vec<String>,
    pub opengraph: OpenGraphObject,
    pub meta_tags: Vec<MetaTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<SeriesSummary>,
}

impl ContentResponse {
    pub fn build<T: LiveContent>(
        item: &T,
        ctx: &SiteContext,
        og_image: Option<&image_file::Model>,
        tags: Vec<String>,
        separator: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let base = item.base();
        let opengraph = item.opengraph(ctx, og_image, &tags);
        let meta_tags = opengraph
            .meta_tags()
            .into_iter()
            .map(|(property, content)| MetaTag { property, content })
            .collect();

        Self {
            id: item.id(),
            kind: T::KIND,
            title: base.title.to_string(),
            slug: base.slug.to_string(),
            url: item.url(ctx),
            status: base.status,
            is_live: base.is_live(now),
            description: base.description.to_string(),
            body: base.body.to_string(),
            excerpt: base.excerpt(separator).to_string(),
            icon_name: item.icon_name(ctx),
            copyright_notice: item.copyright_notice(ctx, now),
            published_time: base.published_time,
            modified_time: base.modified_time,
            expiration_time: base.expiration_time,
            author_display_name: base.author_display_name.to_string(),
            author_profile_url: base.author_profile_url.to_string(),
            locale: base.locale.to_string(),
            tags,
            opengraph,
            meta_tags,
            section: None,
            series: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    #[serde(flatten)]
    pub content: ContentResponse,
    pub images: Vec<ImageItemResponse>,
    pub audio: Vec<AudioItemResponse>,
    pub videos: Vec<VideoItemResponse>,
}

#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub url: String,
    pub articles: Vec<ContentResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_params_default_and_cap() {
        let params = PageParams { page: None, limit: None };
        assert_eq!(params.resolve(10), (1, 10));

        let params = PageParams { page: Some(0), limit: Some(1000) };
        assert_eq!(params.resolve(10), (1, MAX_PAGE_SIZE));
    }

    #[test]
    fn article_request_flattens_content_fields() {
        let req: CreateArticleRequest = serde_json::from_value(json!({
            "section": "news",
            "title": "Hello",
            "tags": ["a"],
        }))
        .unwrap();

        assert_eq!(req.section, "news");
        assert_eq!(req.content.title, "Hello");
        assert_eq!(req.content.status, ContentStatus::Usable);
        assert!(req.validate().is_ok());

        let bad: CreateArticleRequest =
            serde_json::from_value(json!({"section": "news", "title": "", "slug": "Not A Slug"})).unwrap();
        assert!(bad.validate().is_err());
    }
}
