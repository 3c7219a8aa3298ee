use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "image_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_serializing)]
    pub id: i64,
    #[sea_orm(unique, index)]
    pub public_id: Uuid,

    /// Also exposed as the image title.
    pub name: String,
    pub url: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub default_alt_text: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub mime_type: String,
    pub size: i64,

    pub date_taken: Option<DateTimeUtc>,
    pub uploaded_at: DateTimeUtc,
    #[sea_orm(column_type = "Text")]
    pub custom_copyright_notice: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::article_image::Entity")]
    ArticleImage,
}

impl Related<super::article_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArticleImage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
