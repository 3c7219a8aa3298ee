use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Article Images
        manager.create_table(
            Table::create()
                .table(ArticleImages::Table)
                .if_not_exists()
                .col(ColumnDef::new(Item::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Item::ArticleId).big_integer().not_null())
                .col(ColumnDef::new(ArticleImages::ImageFileId).big_integer().not_null())
                .col(ColumnDef::new(Item::ContextualTitle).string().not_null().default(""))
                .col(ColumnDef::new(ArticleImages::ContextualAltText).string().not_null().default(""))
                .col(ColumnDef::new(Item::ContextualDescription).text().not_null().default(""))
                .col(ColumnDef::new(Item::SortOrder).integer().not_null().default(0))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_article_images_article_id")
                        .from(ArticleImages::Table, Item::ArticleId)
                        .to(Articles::Table, Articles::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_article_images_image_file_id")
                        .from(ArticleImages::Table, ArticleImages::ImageFileId)
                        .to(ImageFiles::Table, ImageFiles::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        // 2. Article Audio
        manager.create_table(
            Table::create()
                .table(ArticleAudio::Table)
                .if_not_exists()
                .col(ColumnDef::new(Item::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Item::ArticleId).big_integer().not_null())
                .col(ColumnDef::new(ArticleAudio::AudioFileId).big_integer().not_null())
                .col(ColumnDef::new(Item::ContextualTitle).string().not_null().default(""))
                .col(ColumnDef::new(Item::ContextualDescription).text().not_null().default(""))
                .col(ColumnDef::new(Item::SortOrder).integer().not_null().default(0))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_article_audio_article_id")
                        .from(ArticleAudio::Table, Item::ArticleId)
                        .to(Articles::Table, Articles::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_article_audio_audio_file_id")
                        .from(ArticleAudio::Table, ArticleAudio::AudioFileId)
                        .to(AudioFiles::Table, AudioFiles::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        // 3. Article Videos
        manager.create_table(
            Table::create()
                .table(ArticleVideos::Table)
                .if_not_exists()
                .col(ColumnDef::new(Item::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Item::ArticleId).big_integer().not_null())
                .col(ColumnDef::new(ArticleVideos::VideoFileId).big_integer().not_null())
                .col(ColumnDef::new(Item::ContextualTitle).string().not_null().default(""))
                .col(ColumnDef::new(Item::ContextualDescription).text().not_null().default(""))
                .col(ColumnDef::new(Item::SortOrder).integer().not_null().default(0))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_article_videos_article_id")
                        .from(ArticleVideos::Table, Item::ArticleId)
                        .to(Articles::Table, Articles::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_article_videos_video_file_id")
                        .from(ArticleVideos::Table, ArticleVideos::VideoFileId)
                        .to(VideoFiles::Table, VideoFiles::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        // Collections are always read per article in order
        manager.create_index(Index::create().name("idx_article_images_article_order").table(ArticleImages::Table).col(Item::ArticleId).col(Item::SortOrder).to_owned()).await?;
        manager.create_index(Index::create().name("idx_article_audio_article_order").table(ArticleAudio::Table).col(Item::ArticleId).col(Item::SortOrder).to_owned()).await?;
        manager.create_index(Index::create().name("idx_article_videos_article_order").table(ArticleVideos::Table).col(Item::ArticleId).col(Item::SortOrder).to_owned()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ArticleVideos::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ArticleAudio::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ArticleImages::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Item {
    Id,
    ArticleId,
    ContextualTitle,
    ContextualDescription,
    SortOrder,
}

#[derive(Iden)]
enum ArticleImages {
    Table,
    ImageFileId,
    ContextualAltText,
}

#[derive(Iden)]
enum ArticleAudio {
    Table,
    AudioFileId,
}

#[derive(Iden)]
enum ArticleVideos {
    Table,
    VideoFileId,
}

#[derive(Iden)]
enum Articles {
    Table,
    Id,
}

#[derive(Iden)]
enum ImageFiles {
    Table,
    Id,
}

#[derive(Iden)]
enum AudioFiles {
    Table,
    Id,
}

#[derive(Iden)]
enum VideoFiles {
    Table,
    Id,
}
