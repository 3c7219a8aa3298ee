use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Sites (domain registry every other table is scoped by)
        manager.create_table(
            Table::create()
                .table(Sites::Table)
                .if_not_exists()
                .col(ColumnDef::new(Sites::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Sites::Domain).string_len(100).not_null().unique_key())
                .col(ColumnDef::new(Sites::Name).string_len(50).not_null())
                .to_owned(),
        ).await?;

        // 2. Site Vars
        manager.create_table(
            Table::create()
                .table(SiteVars::Table)
                .if_not_exists()
                .col(ColumnDef::new(SiteVars::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(SiteVars::SiteId).big_integer().not_null())
                .col(ColumnDef::new(SiteVars::Name).string_len(100).not_null())
                .col(ColumnDef::new(SiteVars::Value).text().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_site_vars_site_id")
                        .from(SiteVars::Table, SiteVars::SiteId)
                        .to(Sites::Table, Sites::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        manager.create_index(
            Index::create()
                .name("uq_site_vars_site_id_name")
                .table(SiteVars::Table)
                .col(SiteVars::SiteId)
                .col(SiteVars::Name)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SiteVars::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Sites::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(Iden)]
pub enum Sites {
    Table,
    Id,
    Domain,
    Name,
}

#[derive(Iden)]
enum SiteVars {
    Table,
    Id,
    SiteId,
    Name,
    Value,
}
