pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_sites;
mod m20240101_000002_create_media_files;
mod m20240101_000003_create_content_tables;
mod m20240101_000004_create_article_collections;
mod m20240101_000005_create_menus;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_sites::Migration),
            Box::new(m20240101_000002_create_media_files::Migration),
            Box::new(m20240101_000003_create_content_tables::Migration),
            Box::new(m20240101_000004_create_article_collections::Migration),
            Box::new(m20240101_000005_create_menus::Migration),
        ]
    }
}
