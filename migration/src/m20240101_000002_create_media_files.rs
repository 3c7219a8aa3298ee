use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Images
        manager.create_table(
            Table::create()
                .table(ImageFiles::Table)
                .if_not_exists()
                .col(ColumnDef::new(ImageFiles::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(ImageFiles::PublicId).uuid().not_null().unique_key())
                .col(ColumnDef::new(ImageFiles::Name).string().not_null().default(""))
                .col(ColumnDef::new(ImageFiles::Url).string().not_null())
                .col(ColumnDef::new(ImageFiles::Description).text().not_null().default(""))
                .col(ColumnDef::new(ImageFiles::DefaultAltText).string().not_null().default(""))
                .col(ColumnDef::new(ImageFiles::Width).integer().null())
                .col(ColumnDef::new(ImageFiles::Height).integer().null())
                .col(ColumnDef::new(ImageFiles::MimeType).string().not_null())
                .col(ColumnDef::new(ImageFiles::Size).big_integer().not_null().default(0))
                .col(ColumnDef::new(ImageFiles::DateTaken).timestamp_with_time_zone().null())
                .col(ColumnDef::new(ImageFiles::UploadedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .col(ColumnDef::new(ImageFiles::CustomCopyrightNotice).text().not_null().default(""))
                .to_owned(),
        ).await?;

        // 2. Video
        manager.create_table(
            Table::create()
                .table(VideoFiles::Table)
                .if_not_exists()
                .col(ColumnDef::new(VideoFiles::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(VideoFiles::PublicId).uuid().not_null().unique_key())
                .col(ColumnDef::new(VideoFiles::Name).string().not_null().default(""))
                .col(ColumnDef::new(VideoFiles::Url).string().not_null())
                .col(ColumnDef::new(VideoFiles::Description).text().not_null().default(""))
                .col(ColumnDef::new(VideoFiles::Width).integer().null())
                .col(ColumnDef::new(VideoFiles::Height).integer().null())
                .col(ColumnDef::new(VideoFiles::Duration).double().null())
                .col(ColumnDef::new(VideoFiles::MimeType).string().not_null())
                .col(ColumnDef::new(VideoFiles::Size).big_integer().not_null().default(0))
                .col(ColumnDef::new(VideoFiles::PublishedTime).timestamp_with_time_zone().null())
                .col(ColumnDef::new(VideoFiles::UploadedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .col(ColumnDef::new(VideoFiles::CustomCopyrightNotice).text().not_null().default(""))
                .to_owned(),
        ).await?;

        // 3. Audio
        manager.create_table(
            Table::create()
                .table(AudioFiles::Table)
                .if_not_exists()
                .col(ColumnDef::new(AudioFiles::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(AudioFiles::PublicId).uuid().not_null().unique_key())
                .col(ColumnDef::new(AudioFiles::Name).string().not_null().default(""))
                .col(ColumnDef::new(AudioFiles::Url).string().not_null())
                .col(ColumnDef::new(AudioFiles::Description).text().not_null().default(""))
                .col(ColumnDef::new(AudioFiles::Duration).double().null())
                .col(ColumnDef::new(AudioFiles::MimeType).string().not_null())
                .col(ColumnDef::new(AudioFiles::Size).big_integer().not_null().default(0))
                .col(ColumnDef::new(AudioFiles::PublishedTime).timestamp_with_time_zone().null())
                .col(ColumnDef::new(AudioFiles::UploadedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .col(ColumnDef::new(AudioFiles::CustomCopyrightNotice).text().not_null().default(""))
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AudioFiles::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(VideoFiles::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ImageFiles::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(Iden)]
pub enum ImageFiles {
    Table,
    Id,
    PublicId,
    Name,
    Url,
    Description,
    DefaultAltText,
    Width,
    Height,
    MimeType,
    Size,
    DateTaken,
    UploadedAt,
    CustomCopyrightNotice,
}

#[derive(Iden)]
pub enum VideoFiles {
    Table,
    Id,
    PublicId,
    Name,
    Url,
    Description,
    Width,
    Height,
    Duration,
    MimeType,
    Size,
    PublishedTime,
    UploadedAt,
    CustomCopyrightNotice,
}

#[derive(Iden)]
pub enum AudioFiles {
    Table,
    Id,
    PublicId,
    Name,
    Url,
    Description,
    Duration,
    MimeType,
    Size,
    PublishedTime,
    UploadedAt,
    CustomCopyrightNotice,
}
