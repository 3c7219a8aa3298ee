use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "audio_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_serializing)]
    pub id: i64,
    #[sea_orm(unique, index)]
    pub public_id: Uuid,

    pub name: String,
    pub url: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Length in seconds.
    #[sea_orm(column_type = "Double", nullable)]
    pub duration: Option<f64>,
    pub mime_type: String,
    pub size: i64,

    pub published_time: Option<DateTimeUtc>,
    pub uploaded_at: DateTimeUtc,
    #[sea_orm(column_type = "Text")]
    pub custom_copyright_notice: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::article_audio::Entity")]
    ArticleAudio,
}

impl Related<super::article_audio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArticleAudio.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
