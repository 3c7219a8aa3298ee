use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::content::opengraph::ImageProp;
use crate::utils::validator_utils::validate_slug;

#[derive(Deserialize, Validate)]
pub struct CreateMenuRequest {
    #[validate(length(min = 1, max = 255, message = "Admin name is required"))]
    pub admin_name: String,
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub title: String,
}

#[derive(Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Absolute path or full URL with scheme.
    #[validate(length(min = 1, max = 255, message = "URL is required"))]
    pub url: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub custom_icon: String,
    #[serde(default)]
    pub description: String,
    pub og_image: Option<Uuid>,
    /// Appended after existing links when omitted.
    pub sort_order: Option<i32>,
}

#[derive(Deserialize)]
pub struct SectionMenuParams {
    pub title: Option<String>,
    /// Comma separated page slugs appended after the sections.
    pub pages: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub description: String,
    pub icon_name: String,
    pub image: Vec<ImageProp>,
}

#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub id: i64,
    pub admin_name: String,
    pub slug: String,
    pub title: String,
    pub links: Vec<LinkResponse>,
}

#[derive(Debug, Serialize)]
pub struct MenuSummary {
    pub id: i64,
    pub admin_name: String,
    pub slug: String,
    pub title: String,
}

/// Entry of the computed section menu.
#[derive(Debug, Serialize)]
pub struct MenuEntry {
    pub title: String,
    pub url: String,
    pub icon_name: String,
}

#[derive(Debug, Serialize)]
pub struct SectionMenuResponse {
    pub title: String,
    pub links: Vec<MenuEntry>,
}
