use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

/// Editorial status, vocabulary from the IPTC `creativeWorkStatus` terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[sea_orm(string_value = "withheld")]
    Withheld,
    #[default]
    #[sea_orm(string_value = "usable")]
    Usable,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Discriminator for rows that can point at any content table (tags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    #[sea_orm(string_value = "section")]
    Section,
    #[sea_orm(string_value = "page")]
    Page,
    #[sea_orm(string_value = "home_page")]
    HomePage,
    #[sea_orm(string_value = "article")]
    Article,
}
