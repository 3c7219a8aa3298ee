//! Media assets and the per-article collections that reference them.

use chrono::{DateTime, NaiveDateTime, Utc};

use super::copyright::{media_copyright_year, media_notice};
use crate::entities::{article_audio, article_image, article_video, audio_file, image_file, video_file};

pub const VIDEO_TYPES: &[&str] = &[
    "application/vnd.dvb.ait",
    "video/mp2t",
    "video/mp4",
    "video/mpeg",
    "video/ogg",
    "video/quicktime",
    "video/webm",
    "video/x-msvideo",
    "video/x-ms-wmv",
    "video/x-sgi-movie",
];

pub const AUDIO_TYPES: &[&str] = &[
    "audio/aac",
    "audio/midi",
    "audio/mp4",
    "audio/mpeg",
    "audio/ogg",
    "audio/opus",
    "audio/wav",
    "audio/webm",
    "audio/x-flac",
    "audio/x-midi",
    "audio/x-wav",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
    Video,
}

impl MediaKind {
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        if mime_type.starts_with("image/") {
            Some(MediaKind::Image)
        } else if AUDIO_TYPES.contains(&mime_type) {
            Some(MediaKind::Audio)
        } else if VIDEO_TYPES.contains(&mime_type) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

/// Parse an EXIF `DateTimeOriginal` value (`YYYY:MM:DD HH:MM:SS`).
pub fn parse_exif_datetime(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), "%Y:%m:%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Capture date for a new image: explicit value, then EXIF, then `now`.
/// A malformed EXIF value is not an error.
pub fn resolve_date_taken(
    explicit: Option<DateTime<Utc>>,
    exif_original: Option<&str>,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    if let Some(date) = explicit {
        return date;
    }
    match exif_original {
        Some(raw) => parse_exif_datetime(raw).unwrap_or_else(|| {
            tracing::warn!(exif = raw, "Unreadable DateTimeOriginal, using upload time");
            now
        }),
        None => now,
    }
}

impl image_file::Model {
    pub fn copyright_year(&self, now: DateTime<Utc>) -> i32 {
        media_copyright_year(self.date_taken, Some(self.uploaded_at), now)
    }

    pub fn copyright_notice(&self, now: DateTime<Utc>) -> String {
        media_notice(&self.custom_copyright_notice, self.copyright_year(now))
    }
}

impl audio_file::Model {
    pub fn copyright_year(&self, now: DateTime<Utc>) -> i32 {
        media_copyright_year(self.published_time, Some(self.uploaded_at), now)
    }

    pub fn copyright_notice(&self, now: DateTime<Utc>) -> String {
        media_notice(&self.custom_copyright_notice, self.copyright_year(now))
    }
}

impl video_file::Model {
    pub fn copyright_year(&self, now: DateTime<Utc>) -> i32 {
        media_copyright_year(self.published_time, Some(self.uploaded_at), now)
    }

    pub fn copyright_notice(&self, now: DateTime<Utc>) -> String {
        media_notice(&self.custom_copyright_notice, self.copyright_year(now))
    }
}

fn first_non_empty<'a>(contextual: &'a str, fallback: &'a str) -> &'a str {
    if contextual.is_empty() { fallback } else { contextual }
}

/// Collection entry joined with its file. Contextual values win over the
/// file's own metadata when they are set.
pub struct ImageItem<'a> {
    pub item: &'a article_image::Model,
    pub file: &'a image_file::Model,
}

impl<'a> ImageItem<'a> {
    pub fn title(&self) -> &'a str {
        first_non_empty(&self.item.contextual_title, &self.file.name)
    }

    pub fn alt_text(&self) -> &'a str {
        first_non_empty(&self.item.contextual_alt_text, &self.file.default_alt_text)
    }

    pub fn description(&self) -> &'a str {
        first_non_empty(&self.item.contextual_description, &self.file.description)
    }
}

pub struct AudioItem<'a> {
    pub item: &'a article_audio::Model,
    pub file: &'a audio_file::Model,
}

impl<'a> AudioItem<'a> {
    pub fn title(&self) -> &'a str {
        first_non_empty(&self.item.contextual_title, &self.file.name)
    }

    pub fn description(&self) -> &'a str {
        first_non_empty(&self.item.contextual_description, &self.file.description)
    }
}

pub struct VideoItem<'a> {
    pub item: &'a article_video::Model,
    pub file: &'a video_file::Model,
}

impl<'a> VideoItem<'a> {
    pub fn title(&self) -> &'a str {
        first_non_empty(&self.item.contextual_title, &self.file.name)
    }

    pub fn description(&self) -> &'a str {
        first_non_empty(&self.item.contextual_description, &self.file.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};
    use uuid::Uuid;

    fn image(name: &str) -> image_file::Model {
        image_file::Model {
            id: 1,
            public_id: Uuid::now_v7(),
            name: name.into(),
            url: "https://cdn.example.com/a.jpg".into(),
            description: "Stock description".into(),
            default_alt_text: "Stock alt".into(),
            width: Some(800),
            height: Some(600),
            mime_type: "image/jpeg".into(),
            size: 10,
            date_taken: None,
            uploaded_at: Utc.with_ymd_and_hms(2016, 7, 1, 0, 0, 0).unwrap(),
            custom_copyright_notice: String::new(),
        }
    }

    #[test]
    fn classifies_mime_types() {
        assert_eq!(MediaKind::from_mime("image/webp"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_mime("audio/x-flac"), Some(MediaKind::Audio));
        assert_eq!(MediaKind::from_mime("video/quicktime"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_mime("application/pdf"), None);
    }

    #[test]
    fn exif_dates_parse_or_fall_back() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let parsed = resolve_date_taken(None, Some("2019:08:17 14:05:09"), now);
        assert_eq!(parsed, Utc.with_ymd_and_hms(2019, 8, 17, 14, 5, 9).unwrap());

        assert_eq!(resolve_date_taken(None, Some("17/08/2019"), now), now);
        assert_eq!(resolve_date_taken(None, Some("2019:13:45 99:00:00"), now), now);
        assert_eq!(resolve_date_taken(None, None, now), now);

        let explicit = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(resolve_date_taken(Some(explicit), Some("2019:08:17 14:05:09"), now), explicit);
    }

    #[test]
    fn image_copyright_uses_capture_then_upload_year() {
        let now = Utc::now();
        let mut file = image("Harbour");
        file.custom_copyright_notice = "© {} Harbour Photos".into();
        assert_eq!(file.copyright_notice(now), "© 2016 Harbour Photos");

        file.date_taken = Some(Utc.with_ymd_and_hms(2012, 2, 2, 0, 0, 0).unwrap());
        assert_eq!(file.copyright_year(now), 2012);

        file.custom_copyright_notice.clear();
        assert_eq!(file.copyright_notice(now), "");
        assert!(file.copyright_year(now) <= now.year());
    }

    #[test]
    fn contextual_values_override_file_metadata() {
        let file = image("Harbour");
        let mut item = article_image::Model {
            id: 1,
            article_id: 1,
            image_file_id: file.id,
            contextual_title: String::new(),
            contextual_alt_text: String::new(),
            contextual_description: String::new(),
            sort_order: 0,
        };

        let view = ImageItem { item: &item, file: &file };
        assert_eq!(view.title(), "Harbour");
        assert_eq!(view.alt_text(), "Stock alt");
        assert_eq!(view.description(), "Stock description");

        item.contextual_title = "Morning at the harbour".into();
        item.contextual_alt_text = "Fishing boats at dawn".into();
        let view = ImageItem { item: &item, file: &file };
        assert_eq!(view.title(), "Morning at the harbour");
        assert_eq!(view.alt_text(), "Fishing boats at dawn");
        assert_eq!(view.description(), "Stock description");
    }
}
