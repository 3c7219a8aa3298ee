use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::content::media::{AudioItem, ImageItem, VideoItem};
use crate::entities::{audio_file, image_file, video_file};

/// Metadata for a file already placed in storage.
#[derive(Deserialize, Validate)]
pub struct RegisterImageRequest {
    #[serde(default)]
    pub name: String,
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
    #[validate(length(min = 1))]
    pub mime_type: String,
    #[serde(default)]
    pub size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_alt_text: String,
    pub date_taken: Option<DateTime<Utc>>,
    /// Raw EXIF `DateTimeOriginal`, consulted when `date_taken` is absent.
    pub exif_date_time_original: Option<String>,
    #[serde(default)]
    pub custom_copyright_notice: String,
}

#[derive(Deserialize, Validate)]
pub struct RegisterAvRequest {
    #[serde(default)]
    pub name: String,
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
    #[validate(length(min = 1))]
    pub mime_type: String,
    #[serde(default)]
    pub size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    #[validate(range(min = 0.0))]
    pub duration: Option<f64>,
    #[serde(default)]
    pub description: String,
    pub published_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub custom_copyright_notice: String,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub mime_type: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub alt_text: String,
    pub description: String,
    pub date_taken: Option<DateTime<Utc>>,
    pub copyright_notice: String,
}

impl ImageResponse {
    pub fn new(file: &image_file::Model, now: DateTime<Utc>) -> Self {
        Self {
            id: file.public_id,
            title: file.name.clone(),
            url: file.url.clone(),
            mime_type: file.mime_type.clone(),
            width: file.width,
            height: file.height,
            alt_text: file.default_alt_text.clone(),
            description: file.description.clone(),
            date_taken: file.date_taken,
            copyright_notice: file.copyright_notice(now),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AvResponse {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    pub duration: Option<f64>,
    pub description: String,
    pub copyright_notice: String,
}

impl AvResponse {
    pub fn from_audio(file: &audio_file::Model, now: DateTime<Utc>) -> Self {
        Self {
            id: file.public_id,
            title: file.name.clone(),
            url: file.url.clone(),
            mime_type: file.mime_type.clone(),
            width: None,
            height: None,
            duration: file.duration,
            description: file.description.clone(),
            copyright_notice: file.copyright_notice(now),
        }
    }

    pub fn from_video(file: &video_file::Model, now: DateTime<Utc>) -> Self {
        Self {
            id: file.public_id,
            title: file.name.clone(),
            url: file.url.clone(),
            mime_type: file.mime_type.clone(),
            width: file.width,
            height: file.height,
            duration: file.duration,
            description: file.description.clone(),
            copyright_notice: file.copyright_notice(now),
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct AttachMediaRequest {
    /// Public id of the media file.
    pub file: Uuid,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub contextual_title: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub contextual_alt_text: String,
    #[serde(default)]
    pub contextual_description: String,
}

#[derive(Deserialize, Validate)]
pub struct UpdateImageItemRequest {
    #[validate(length(max = 255))]
    pub contextual_title: Option<String>,
    #[validate(length(max = 255))]
    pub contextual_alt_text: Option<String>,
    pub contextual_description: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct ReorderRequest {
    /// Item ids in their new order. Must name every item of the collection.
    #[validate(length(min = 1))]
    pub items: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct ImageItemResponse {
    pub id: i64,
    pub file: Uuid,
    pub title: String,
    pub alt_text: String,
    pub description: String,
    pub url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub sort_order: i32,
}

impl From<ImageItem<'_>> for ImageItemResponse {
    fn from(view: ImageItem<'_>) -> Self {
        Self {
            id: view.item.id,
            file: view.file.public_id,
            title: view.title().to_string(),
            alt_text: view.alt_text().to_string(),
            description: view.description().to_string(),
            url: view.file.url.clone(),
            width: view.file.width,
            height: view.file.height,
            sort_order: view.item.sort_order,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AudioItemResponse {
    pub id: i64,
    pub file: Uuid,
    pub title: String,
    pub description: String,
    pub url: String,
    pub duration: Option<f64>,
    pub sort_order: i32,
}

impl From<AudioItem<'_>> for AudioItemResponse {
    fn from(view: AudioItem<'_>) -> Self {
        Self {
            id: view.item.id,
            file: view.file.public_id,
            title: view.title().to_string(),
            description: view.description().to_string(),
            url: view.file.url.clone(),
            duration: view.file.duration,
            sort_order: view.item.sort_order,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VideoItemResponse {
    pub id: i64,
    pub file: Uuid,
    pub title: String,
    pub description: String,
    pub url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration: Option<f64>,
    pub sort_order: i32,
}

impl From<VideoItem<'_>> for VideoItemResponse {
    fn from(view: VideoItem<'_>) -> Self {
        Self {
            id: view.item.id,
            file: view.file.public_id,
            title: view.title().to_string(),
            description: view.description().to_string(),
            url: view.file.url.clone(),
            width: view.file.width,
            height: view.file.height,
            duration: view.file.duration,
            sort_order: view.item.sort_order,
        }
    }
}
