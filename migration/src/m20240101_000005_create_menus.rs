use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Menus
        manager.create_table(
            Table::create()
                .table(Menus::Table)
                .if_not_exists()
                .col(ColumnDef::new(Menus::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Menus::SiteId).big_integer().not_null())
                .col(ColumnDef::new(Menus::AdminName).string().not_null())
                .col(ColumnDef::new(Menus::Slug).string().not_null())
                .col(ColumnDef::new(Menus::Title).string().not_null().default(""))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_menus_site_id")
                        .from(Menus::Table, Menus::SiteId)
                        .to(Sites::Table, Sites::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        // 2. Links
        manager.create_table(
            Table::create()
                .table(Links::Table)
                .if_not_exists()
                .col(ColumnDef::new(Links::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Links::MenuId).big_integer().not_null())
                .col(ColumnDef::new(Links::Url).string().not_null())
                .col(ColumnDef::new(Links::Title).string().not_null().default(""))
                .col(ColumnDef::new(Links::CustomIcon).string_len(50).not_null().default(""))
                .col(ColumnDef::new(Links::Description).text().not_null().default(""))
                .col(ColumnDef::new(Links::OgImageId).big_integer().null())
                .col(ColumnDef::new(Links::SortOrder).integer().not_null().default(0))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_links_menu_id")
                        .from(Links::Table, Links::MenuId)
                        .to(Menus::Table, Menus::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_links_og_image_id")
                        .from(Links::Table, Links::OgImageId)
                        .to(ImageFiles::Table, ImageFiles::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                )
                .to_owned(),
        ).await?;

        manager.create_index(Index::create().name("uq_menus_site_id_slug").table(Menus::Table).col(Menus::SiteId).col(Menus::Slug).unique().to_owned()).await?;
        manager.create_index(Index::create().name("uq_links_menu_id_url").table(Links::Table).col(Links::MenuId).col(Links::Url).unique().to_owned()).await?;
        manager.create_index(Index::create().name("uq_links_menu_id_title").table(Links::Table).col(Links::MenuId).col(Links::Title).unique().to_owned()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Links::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Menus::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Menus {
    Table,
    Id,
    SiteId,
    AdminName,
    Slug,
    Title,
}

#[derive(Iden)]
enum Links {
    Table,
    Id,
    MenuId,
    Url,
    Title,
    CustomIcon,
    Description,
    OgImageId,
    SortOrder,
}

#[derive(Iden)]
enum Sites {
    Table,
    Id,
}

#[derive(Iden)]
enum ImageFiles {
    Table,
    Id,
}
