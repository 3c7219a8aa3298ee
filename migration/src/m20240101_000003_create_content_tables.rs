use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_sites::Sites;
use crate::m20240101_000002_create_media_files::ImageFiles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Sections & Pages share the Open Graph column set
        manager.create_table(content_table(Sections::Table, "website").to_owned()).await?;
        manager.create_table(content_table(Pages::Table, "website").to_owned()).await?;

        // 2. Home Pages (no slug uniqueness, distinguished by admin name)
        manager.create_table(
            content_table(HomePages::Table, "website")
                .col(ColumnDef::new(HomePages::AdminName).string().not_null().unique_key())
                .to_owned(),
        ).await?;

        // 3. Article Series
        manager.create_table(
            Table::create()
                .table(ArticleSeries::Table)
                .if_not_exists()
                .col(ColumnDef::new(ArticleSeries::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(ArticleSeries::SiteId).big_integer().not_null())
                .col(ColumnDef::new(ArticleSeries::Name).string().not_null())
                .col(ColumnDef::new(ArticleSeries::Slug).string().not_null())
                .col(ColumnDef::new(ArticleSeries::Description).text().not_null().default(""))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_article_series_site_id")
                        .from(ArticleSeries::Table, ArticleSeries::SiteId)
                        .to(Sites::Table, Sites::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        // 4. Articles (nested under a section, optionally part of a series)
        manager.create_table(
            content_table(Articles::Table, "article")
                .col(ColumnDef::new(Articles::SectionId).big_integer().not_null())
                .col(ColumnDef::new(Articles::SeriesId).big_integer().null())
                .col(ColumnDef::new(Articles::SeriesOrder).integer().not_null().default(0))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_articles_section_id")
                        .from(Articles::Table, Articles::SectionId)
                        .to(Sections::Table, Content::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_articles_series_id")
                        .from(Articles::Table, Articles::SeriesId)
                        .to(ArticleSeries::Table, ArticleSeries::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                )
                .to_owned(),
        ).await?;

        // 5. Tags (label set shared by every content kind)
        manager.create_table(
            Table::create()
                .table(Tags::Table)
                .if_not_exists()
                .col(ColumnDef::new(Tags::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Tags::Name).string_len(100).not_null().unique_key())
                .col(ColumnDef::new(Tags::Slug).string_len(100).not_null().unique_key())
                .to_owned(),
        ).await?;

        manager.create_table(
            Table::create()
                .table(ContentTags::Table)
                .if_not_exists()
                .col(ColumnDef::new(ContentTags::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(ContentTags::TagId).big_integer().not_null())
                .col(ColumnDef::new(ContentTags::ContentKind).string_len(20).not_null())
                .col(ColumnDef::new(ContentTags::ObjectId).big_integer().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_content_tags_tag_id")
                        .from(ContentTags::Table, ContentTags::TagId)
                        .to(Tags::Table, Tags::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        // 6. Uniqueness & lookup indexes
        manager.create_index(Index::create().name("uq_sections_site_id_slug").table(Sections::Table).col(Content::SiteId).col(Content::Slug).unique().to_owned()).await?;
        manager.create_index(Index::create().name("uq_home_pages_site_id_slug").table(HomePages::Table).col(Content::SiteId).col(Content::Slug).unique().to_owned()).await?;
        manager.create_index(Index::create().name("uq_pages_site_id_slug").table(Pages::Table).col(Content::SiteId).col(Content::Slug).unique().to_owned()).await?;
        manager.create_index(Index::create().name("uq_article_series_site_id_slug").table(ArticleSeries::Table).col(ArticleSeries::SiteId).col(ArticleSeries::Slug).unique().to_owned()).await?;
        manager.create_index(
            Index::create()
                .name("uq_articles_site_id_section_id_slug")
                .table(Articles::Table)
                .col(Content::SiteId)
                .col(Articles::SectionId)
                .col(Content::Slug)
                .unique()
                .to_owned()
        ).await?;
        manager.create_index(
            Index::create()
                .name("uq_content_tags_tag_kind_object")
                .table(ContentTags::Table)
                .col(ContentTags::TagId)
                .col(ContentTags::ContentKind)
                .col(ContentTags::ObjectId)
                .unique()
                .to_owned()
        ).await?;
        manager.create_index(Index::create().name("idx_content_tags_kind_object").table(ContentTags::Table).col(ContentTags::ContentKind).col(ContentTags::ObjectId).to_owned()).await?;

        for (status_idx, published_idx, table) in [
            ("idx_sections_status", "idx_sections_published_time", Sections::Table.to_string()),
            ("idx_pages_status", "idx_pages_published_time", Pages::Table.to_string()),
            ("idx_home_pages_status", "idx_home_pages_published_time", HomePages::Table.to_string()),
            ("idx_articles_status", "idx_articles_published_time", Articles::Table.to_string()),
        ] {
            manager.create_index(Index::create().name(status_idx).table(Alias::new(&table)).col(Content::Status).to_owned()).await?;
            manager.create_index(Index::create().name(published_idx).table(Alias::new(&table)).col(Content::PublishedTime).to_owned()).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ContentTags::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Tags::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Articles::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ArticleSeries::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(HomePages::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Pages::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Sections::Table).to_owned()).await?;
        Ok(())
    }
}

/// Columns shared by every Open Graph content table.
fn content_table<T>(table: T, og_type: &str) -> TableCreateStatement
where
    T: Iden + Copy + 'static,
{
    let name = table.to_string();
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(Content::Id).big_integer().not_null().auto_increment().primary_key())
        .col(ColumnDef::new(Content::SiteId).big_integer().not_null())
        .col(ColumnDef::new(Content::Title).string().not_null())
        .col(ColumnDef::new(Content::Slug).string().not_null())
        .col(ColumnDef::new(Content::Status).string_len(50).not_null().default("usable"))
        .col(ColumnDef::new(Content::Description).text().not_null().default(""))
        .col(ColumnDef::new(Content::Body).text().not_null().default(""))
        .col(ColumnDef::new(Content::OgImageId).big_integer().null())
        .col(ColumnDef::new(Content::BaseTemplate).string().not_null().default(""))
        .col(ColumnDef::new(Content::ContentTemplate).string().not_null().default(""))
        .col(ColumnDef::new(Content::PublishedTime).timestamp_with_time_zone().null())
        .col(ColumnDef::new(Content::ModifiedTime).timestamp_with_time_zone().null())
        .col(ColumnDef::new(Content::ExpirationTime).timestamp_with_time_zone().null())
        .col(ColumnDef::new(Content::AuthorDisplayName).string().not_null().default(""))
        .col(ColumnDef::new(Content::AuthorProfileUrl).string().not_null().default(""))
        .col(ColumnDef::new(Content::OgType).string_len(50).not_null().default(og_type))
        .col(ColumnDef::new(Content::SeoTitle).string().not_null().default(""))
        .col(ColumnDef::new(Content::SeoDescription).string().not_null().default(""))
        .col(ColumnDef::new(Content::CustomCopyrightNotice).text().not_null().default(""))
        .col(ColumnDef::new(Content::CustomIcon).string_len(50).not_null().default(""))
        .col(ColumnDef::new(Content::Locale).string_len(10).not_null().default("en_US"))
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{name}_site_id"))
                .from(table, Content::SiteId)
                .to(Sites::Table, Sites::Id)
                .on_delete(ForeignKeyAction::Cascade)
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{name}_og_image_id"))
                .from(table, Content::OgImageId)
                .to(ImageFiles::Table, ImageFiles::Id)
                .on_delete(ForeignKeyAction::SetNull)
        )
        .to_owned()
}

#[derive(Iden)]
enum Content {
    Id,
    SiteId,
    Title,
    Slug,
    Status,
    Description,
    Body,
    OgImageId,
    BaseTemplate,
    ContentTemplate,
    PublishedTime,
    ModifiedTime,
    ExpirationTime,
    AuthorDisplayName,
    AuthorProfileUrl,
    OgType,
    SeoTitle,
    SeoDescription,
    CustomCopyrightNotice,
    CustomIcon,
    Locale,
}

#[derive(Iden, Clone, Copy)]
enum Sections {
    Table,
}

#[derive(Iden, Clone, Copy)]
enum Pages {
    Table,
}

#[derive(Iden, Clone, Copy)]
enum HomePages {
    Table,
    AdminName,
}

#[derive(Iden, Clone, Copy)]
pub enum Articles {
    Table,
    SectionId,
    SeriesId,
    SeriesOrder,
}

#[derive(Iden)]
enum ArticleSeries {
    Table,
    Id,
    SiteId,
    Name,
    Slug,
    Description,
}

#[derive(Iden)]
enum Tags {
    Table,
    Id,
    Name,
    Slug,
}

#[derive(Iden)]
enum ContentTags {
    Table,
    Id,
    TagId,
    ContentKind,
    ObjectId,
}
