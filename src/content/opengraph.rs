//! Open Graph (<https://ogp.me>) records built from content items.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{site_context::SiteContext, ContentBase};
use crate::entities::image_file;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageProp {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub alt: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub mime_type: String,
}

impl From<&image_file::Model> for ImageProp {
    fn from(image: &image_file::Model) -> Self {
        Self {
            url: image.url.clone(),
            width: image.width,
            height: image.height,
            alt: image.default_alt_text.clone(),
            mime_type: image.mime_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub og_type: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: Vec<ImageProp>,
    pub locale: String,
    pub site_name: String,
}

impl OpenGraph {
    pub fn from_content(
        base: &ContentBase<'_>,
        url: String,
        ctx: &SiteContext,
        og_image: Option<&image_file::Model>,
    ) -> Self {
        Self {
            og_type: base.og_type.to_string(),
            title: base.seo_title().to_string(),
            description: base.seo_description().to_string(),
            url,
            image: og_image.map(ImageProp::from).into_iter().collect(),
            locale: base.locale.to_string(),
            site_name: ctx.site.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgArticle {
    #[serde(flatten)]
    pub base: OpenGraph,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Profile URLs of the authors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<String>,
}

impl OgArticle {
    pub fn new(base: OpenGraph) -> Self {
        Self {
            base,
            published_time: None,
            modified_time: None,
            expiration_time: None,
            section: None,
            author: Vec::new(),
            tag: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OpenGraphObject {
    Website(OpenGraph),
    Article(OgArticle),
}

impl OpenGraphObject {
    pub fn base(&self) -> &OpenGraph {
        match self {
            OpenGraphObject::Website(og) => og,
            OpenGraphObject::Article(og) => &og.base,
        }
    }

    /// Flatten into `(property, content)` pairs in `<meta>` tag order.
    pub fn meta_tags(&self) -> Vec<(String, String)> {
        let mut tags = Vec::new();
        let mut push = |property: &str, content: &str| {
            if !content.is_empty() {
                tags.push((property.to_string(), content.to_string()));
            }
        };

        let base = self.base();
        push("og:type", &base.og_type);
        push("og:title", &base.title);
        push("og:description", &base.description);
        push("og:url", &base.url);
        push("og:locale", &base.locale);
        push("og:site_name", &base.site_name);
        for image in &base.image {
            push("og:image", &image.url);
            push("og:image:type", &image.mime_type);
            if let Some(width) = image.width {
                push("og:image:width", &width.to_string());
            }
            if let Some(height) = image.height {
                push("og:image:height", &height.to_string());
            }
            push("og:image:alt", &image.alt);
        }

        if let OpenGraphObject::Article(article) = self {
            for (property, time) in [
                ("article:published_time", article.published_time),
                ("article:modified_time", article.modified_time),
                ("article:expiration_time", article.expiration_time),
            ] {
                if let Some(time) = time {
                    push(property, &time.to_rfc3339());
                }
            }
            if let Some(section) = &article.section {
                push("article:section", section);
            }
            for author in &article.author {
                push("article:author", author);
            }
            for tag in &article.tag {
                push("article:tag", tag);
            }
        }

        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{fixtures, LiveContent, SectionedArticle};
    use chrono::TimeZone;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn image() -> image_file::Model {
        image_file::Model {
            id: 3,
            public_id: Uuid::now_v7(),
            name: "Harbour".into(),
            url: "https://cdn.example.com/harbour.jpg".into(),
            description: String::new(),
            default_alt_text: "Boats in the harbour".into(),
            width: Some(1200),
            height: Some(630),
            mime_type: "image/jpeg".into(),
            size: 1024,
            date_taken: None,
            uploaded_at: Utc::now(),
            custom_copyright_notice: String::new(),
        }
    }

    #[test]
    fn base_record_ignores_tags() {
        let ctx = SiteContext::new(fixtures::site(), HashMap::new());
        let mut section = fixtures::section("news");
        section.seo_title = "All the news".into();

        let og = section.opengraph(&ctx, None, &["ignored".to_string()]);
        let OpenGraphObject::Website(og) = og else {
            panic!("sections are plain Open Graph objects");
        };
        assert_eq!(og.og_type, "website");
        assert_eq!(og.title, "All the news");
        assert_eq!(og.url, "https://example.com/news/");
        assert_eq!(og.site_name, "Example");
        assert!(og.image.is_empty());
    }

    #[test]
    fn article_record_keeps_article_fields() {
        let ctx = SiteContext::new(fixtures::site(), HashMap::new());
        let published = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let mut article = fixtures::article("launch", Some(published));
        article.author_profile_url = "https://example.com/authors/sam/".into();
        let item = SectionedArticle { article, section: fixtures::section("news") };

        let og = item.opengraph(&ctx, Some(&image()), &["rust".to_string(), "cms".to_string()]);
        let OpenGraphObject::Article(ref article) = og else {
            panic!("articles serialize as og:article");
        };
        assert_eq!(article.base.og_type, "article");
        assert_eq!(article.section.as_deref(), Some("News"));
        assert_eq!(article.author, vec!["https://example.com/authors/sam/"]);
        assert_eq!(article.tag, vec!["rust", "cms"]);

        let tags = og.meta_tags();
        assert!(tags.contains(&("og:image".into(), "https://cdn.example.com/harbour.jpg".into())));
        assert!(tags.contains(&("og:image:width".into(), "1200".into())));
        assert!(tags.contains(&("article:published_time".into(), published.to_rfc3339())));
        assert_eq!(tags.iter().filter(|(p, _)| p == "article:tag").count(), 2);

        let json = serde_json::to_value(&og).unwrap();
        assert_eq!(json["type"], "article");
        assert_eq!(json["tag"][1], "cms");
    }
}
