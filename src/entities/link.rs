use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Menu entry. Links carry only the url/title/icon subset of Open Graph data.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "links")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub menu_id: i64,
    /// Absolute path or full URL with scheme.
    pub url: String,
    pub title: String,
    pub custom_icon: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub og_image_id: Option<i64>,
    pub sort_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::menu::Entity",
        from = "Column::MenuId",
        to = "super::menu::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Menu,
    #[sea_orm(
        belongs_to = "super::image_file::Entity",
        from = "Column::OgImageId",
        to = "super::image_file::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    OgImage,
}

impl Related<super::menu::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Menu.def()
    }
}

impl Related<super::image_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OgImage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
