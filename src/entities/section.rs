use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::status::ContentStatus;

/// Major site category; articles are nested under a section.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sections")]
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
        belongs_to = "super::image_file::Entity",
        from = "Column::OgImageId",
        to = "super::image_file::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    OgImage,
    #[sea_orm(has_many = "super::article::Entity")]
    Article,
}

impl Related<super::site::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Site.def()
    }
}

impl Related<super::image_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OgImage.def()
    }
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
