use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::status::ContentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub site_id: i64,

    pub title: String,
    pub slug: String,
    pub status: ContentStatus,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    /// Image for social sharing. On articles this caches the first gallery image.
    pub og_image_id: Option<i64>,
    pub base_template: String,
    pub content_template: String,

    pub published_time: Option<DateTimeUtc>,
    pub modified_time: Option<DateTimeUtc>,
    pub expiration_time: Option<DateTimeUtc>,
    pub author_display_name: String,
    pub author_profile_url: String,

    pub og_type: String,
    pub seo_title: String,
    pub seo_description: String,
    #[sea_orm(column_type = "Text")]
    pub custom_copyright_notice: String,
    pub custom_icon: String,
    pub locale: String,

    pub section_id: i64,
    pub series_id: Option<i64>,
    pub series_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::site::Entity",
        from = "Column::SiteId",
        to = "super::site::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Site,
    #[sea_orm(
        belongs_to = "super::section::Entity",
        from = "Column::SectionId",
        to = "super::section::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Section,
    #[sea_orm(
        belongs_to = "super::article_series::Entity",
        from = "Column::SeriesId",
        to = "super::article_series::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Series,
    #[sea_orm(
        belongs_to = "super::image_file::Entity",
        from = "Column::OgImageId",
        to = "super::image_file::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    OgImage,
    #[sea_orm(has_many = "super::article_image::Entity")]
    ArticleImage,
    #[sea_orm(has_many = "super::article_audio::Entity")]
    ArticleAudio,
    #[sea_orm(has_many = "super::article_video::Entity")]
    ArticleVideo,
}

impl Related<super::site::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Site.def()
    }
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::article_series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Series.def()
    }
}

impl Related<super::image_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OgImage.def()
    }
}

impl Related<super::article_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArticleImage.def()
    }
}

impl Related<super::article_audio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArticleAudio.def()
    }
}

impl Related<super::article_video::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArticleVideo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
