//! Rules shared by every Open Graph content type.
//!
//! Sections, pages, home pages and articles store the same column set. Each
//! model lends it out as a [`ContentBase`] so liveness, copyright, icon and
//! excerpt rules are written once, and [`LiveContent`] exposes them uniformly
//! together with the variant-specific URL and Open Graph mapping.

pub mod copyright;
pub mod liveness;
pub mod media;
pub mod opengraph;
pub mod site_context;

use chrono::{DateTime, Datelike, Utc};

use crate::entities::{article, article_series, home_page, image_file, page, section, status::{ContentKind, ContentStatus}};
use opengraph::{OgArticle, OpenGraph, OpenGraphObject};
use site_context::SiteContext;

/// Icon shown for content items when neither the item nor the site picks one.
pub const DEFAULT_CONTENT_ICON: &str = "file-text";
/// Icon shown for menu links when neither the link nor the site picks one.
pub const DEFAULT_LINK_ICON: &str = "link-45deg";

/// Borrowed view of the columns every content table carries.
#[derive(Debug, Clone, Copy)]
pub struct ContentBase<'a> {
    pub site_id: i64,
    pub title: &'a str,
    pub slug: &'a str,
    pub status: ContentStatus,
    pub description: &'a str,
    pub body: &'a str,
    pub og_image_id: Option<i64>,
    pub published_time: Option<DateTime<Utc>>,
    pub modified_time: Option<DateTime<Utc>>,
    pub expiration_time: Option<DateTime<Utc>>,
    pub author_display_name: &'a str,
    pub author_profile_url: &'a str,
    pub og_type: &'a str,
    pub seo_title: &'a str,
    pub seo_description: &'a str,
    pub custom_copyright_notice: &'a str,
    pub custom_icon: &'a str,
    pub locale: &'a str,
}

impl<'a> ContentBase<'a> {
    /// Usable, published at or before `now`, and not yet expired.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.status == ContentStatus::Usable
            && self.published_time.is_some_and(|published| published <= now)
            && self.expiration_time.map_or(true, |expires| expires > now)
    }

    pub fn copyright_year(&self, now: DateTime<Utc>) -> i32 {
        self.published_time.unwrap_or(now).year()
    }

    /// Body text up to the first pagebreak, or the whole body if there is none.
    pub fn excerpt(&self, separator: &str) -> &'a str {
        excerpt(self.body, separator)
    }

    pub fn seo_title(&self) -> &'a str {
        non_empty_or(self.seo_title, self.title)
    }

    pub fn seo_description(&self) -> &'a str {
        non_empty_or(self.seo_description, self.description)
    }

    pub fn icon_name(&self, ctx: &SiteContext) -> String {
        resolve_icon(self.custom_icon, ctx, DEFAULT_CONTENT_ICON)
    }
}

pub fn excerpt<'a>(body: &'a str, separator: &str) -> &'a str {
    if body.is_empty() || separator.is_empty() {
        return body;
    }
    match body.split_once(separator) {
        Some((head, _)) => head,
        None => body,
    }
}

/// custom icon, then the site's `default_icon`, then `fallback`.
pub fn resolve_icon(custom_icon: &str, ctx: &SiteContext, fallback: &str) -> String {
    if !custom_icon.is_empty() {
        return custom_icon.to_string();
    }
    match ctx.var("default_icon") {
        Some(icon) if !icon.is_empty() => icon.to_string(),
        _ => fallback.to_string(),
    }
}

fn non_empty_or<'a>(preferred: &'a str, fallback: &'a str) -> &'a str {
    if preferred.is_empty() { fallback } else { preferred }
}

/// Capabilities shared by every public content type.
pub trait LiveContent {
    const KIND: ContentKind;

    fn id(&self) -> i64;

    fn base(&self) -> ContentBase<'_>;

    /// Path of the item relative to the site root.
    fn canonical_path(&self) -> String;

    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.base().is_live(now)
    }

    fn url(&self, ctx: &SiteContext) -> String {
        format!("https://{}{}", ctx.site.domain, self.canonical_path())
    }

    fn copyright_notice(&self, ctx: &SiteContext, now: DateTime<Utc>) -> String {
        copyright::content_notice(&self.base(), ctx, now)
    }

    fn icon_name(&self, ctx: &SiteContext) -> String {
        self.base().icon_name(ctx)
    }

    fn excerpt(&self, separator: &str) -> &str {
        excerpt(self.base().body, separator)
    }

    /// Plain Open Graph record. Only the base protocol properties are mapped;
    /// types that are proper Open Graph subtypes override this.
    fn opengraph(
        &self,
        ctx: &SiteContext,
        og_image: Option<&image_file::Model>,
        _tags: &[String],
    ) -> OpenGraphObject {
        OpenGraphObject::Website(OpenGraph::from_content(&self.base(), self.url(ctx), ctx, og_image))
    }
}

macro_rules! content_base {
    ($($model:ident),+ $(,)?) => {$(
        impl $model::Model {
            pub fn content_base(&self) -> ContentBase<'_> {
                ContentBase {
                    site_id: self.site_id,
                    title: &self.title,
                    slug: &self.slug,
                    status: self.status,
                    description: &self.description,
                    body: &self.body,
                    og_image_id: self.og_image_id,
                    published_time: self.published_time,
                    modified_time: self.modified_time,
                    expiration_time: self.expiration_time,
                    author_display_name: &self.author_display_name,
                    author_profile_url: &self.author_profile_url,
                    og_type: &self.og_type,
                    seo_title: &self.seo_title,
                    seo_description: &self.seo_description,
                    custom_copyright_notice: &self.custom_copyright_notice,
                    custom_icon: &self.custom_icon,
                    locale: &self.locale,
                }
            }
        }
    )+};
}

content_base!(section, page, home_page, article);

impl LiveContent for section::Model {
    const KIND: ContentKind = ContentKind::Section;

    fn id(&self) -> i64 {
        self.id
    }

    fn base(&self) -> ContentBase<'_> {
        self.content_base()
    }

    fn canonical_path(&self) -> String {
        format!("/{}/", self.slug)
    }
}

impl LiveContent for page::Model {
    const KIND: ContentKind = ContentKind::Page;

    fn id(&self) -> i64 {
        self.id
    }

    fn base(&self) -> ContentBase<'_> {
        self.content_base()
    }

    fn canonical_path(&self) -> String {
        format!("/pages/{}/", self.slug)
    }
}

impl LiveContent for home_page::Model {
    const KIND: ContentKind = ContentKind::HomePage;

    fn id(&self) -> i64 {
        self.id
    }

    fn base(&self) -> ContentBase<'_> {
        self.content_base()
    }

    fn canonical_path(&self) -> String {
        "/".to_string()
    }
}

/// An article together with the section it is filed under. Article URLs and
/// Open Graph data need the section, so articles are always handled in pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionedArticle {
    pub article: article::Model,
    pub section: section::Model,
}

impl LiveContent for SectionedArticle {
    const KIND: ContentKind = ContentKind::Article;

    fn id(&self) -> i64 {
        self.article.id
    }

    fn base(&self) -> ContentBase<'_> {
        self.article.content_base()
    }

    fn canonical_path(&self) -> String {
        format!("/{}/{}/", self.section.slug, self.article.slug)
    }

    fn opengraph(
        &self,
        ctx: &SiteContext,
        og_image: Option<&image_file::Model>,
        tags: &[String],
    ) -> OpenGraphObject {
        let base = self.base();
        let mut og = OgArticle::new(OpenGraph::from_content(&base, self.url(ctx), ctx, og_image));
        og.published_time = base.published_time;
        og.modified_time = base.modified_time;
        og.expiration_time = base.expiration_time;
        og.section = Some(self.section.title.clone());
        if !base.author_profile_url.is_empty() {
            og.author = vec![base.author_profile_url.to_string()];
        }
        og.tag = tags.to_vec();
        OpenGraphObject::Article(og)
    }
}

impl article_series::Model {
    pub fn canonical_path(&self) -> String {
        format!("/series/{}/", self.slug)
    }

    pub fn url(&self, ctx: &SiteContext) -> String {
        format!("https://{}{}", ctx.site.domain, self.canonical_path())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Utc};

    use crate::entities::{article, section, site, status::ContentStatus};

    pub fn site() -> site::Model {
        site::Model { id: 1, domain: "example.com".into(), name: "Example".into() }
    }

    pub fn section(slug: &str) -> section::Model {
        section::Model {
            id: 1,
            site_id: 1,
            title: "News".into(),
            slug: slug.into(),
            status: ContentStatus::Usable,
            description: String::new(),
            body: String::new(),
            og_image_id: None,
            base_template: String::new(),
            content_template: String::new(),
            published_time: None,
            modified_time: None,
            expiration_time: None,
            author_display_name: String::new(),
            author_profile_url: String::new(),
            og_type: "website".into(),
            seo_title: String::new(),
            seo_description: String::new(),
            custom_copyright_notice: String::new(),
            custom_icon: String::new(),
            locale: "en_US".into(),
        }
    }

    pub fn article(slug: &str, published_time: Option<DateTime<Utc>>) -> article::Model {
        let s = section("news");
        article::Model {
            id: 7,
            site_id: 1,
            title: "Launch day".into(),
            slug: slug.into(),
            status: ContentStatus::Usable,
            description: "We shipped".into(),
            body: String::new(),
            og_image_id: None,
            base_template: String::new(),
            content_template: String::new(),
            published_time,
            modified_time: None,
            expiration_time: None,
            author_display_name: String::new(),
            author_profile_url: String::new(),
            og_type: "article".into(),
            seo_title: String::new(),
            seo_description: String::new(),
            custom_copyright_notice: String::new(),
            custom_icon: String::new(),
            locale: "en_US".into(),
            section_id: s.id,
            series_id: None,
            series_order: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::collections::HashMap;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn liveness_requires_usable_published_and_unexpired() {
        let now = now();
        let mut item = fixtures::section("news");
        assert!(!item.is_live(now), "unpublished items are never live");

        item.published_time = Some(now);
        assert!(item.is_live(now), "published exactly now counts as live");

        item.published_time = Some(now + Duration::seconds(1));
        assert!(!item.is_live(now));

        item.published_time = Some(now - Duration::days(1));
        item.expiration_time = Some(now);
        assert!(!item.is_live(now), "expiring exactly now is no longer live");

        item.expiration_time = Some(now + Duration::days(1));
        assert!(item.is_live(now));

        for status in [ContentStatus::Withheld, ContentStatus::Cancelled] {
            item.status = status;
            assert!(!item.is_live(now));
        }
    }

    #[test]
    fn excerpt_stops_at_first_separator() {
        assert_eq!(excerpt("introXmiddleXend", "X"), "intro");
        assert_eq!(excerpt("no break here", "X"), "no break here");
        assert_eq!(excerpt("", "X"), "");
        assert_eq!(excerpt("<p>a</p><!-- pagebreak --><p>b</p>", "<!-- pagebreak -->"), "<p>a</p>");
    }

    #[test]
    fn icon_precedence() {
        let bare = SiteContext::new(fixtures::site(), HashMap::new());
        let with_default = SiteContext::new(
            fixtures::site(),
            HashMap::from([("default_icon".to_string(), "star".to_string())]),
        );

        let mut item = fixtures::section("news");
        assert_eq!(item.icon_name(&bare), DEFAULT_CONTENT_ICON);
        assert_eq!(item.icon_name(&with_default), "star");

        item.custom_icon = "newspaper".into();
        assert_eq!(item.icon_name(&with_default), "newspaper");
        assert_eq!(resolve_icon("", &bare, DEFAULT_LINK_ICON), "link-45deg");
    }

    #[test]
    fn canonical_paths_per_variant() {
        let ctx = SiteContext::new(fixtures::site(), HashMap::new());
        let section = fixtures::section("news");
        let article = SectionedArticle { article: fixtures::article("launch", None), section: section.clone() };

        assert_eq!(section.url(&ctx), "https://example.com/news/");
        assert_eq!(article.url(&ctx), "https://example.com/news/launch/");
    }
}
