pub mod site_seeder;

use sea_orm::DatabaseConnection;
use crate::config::Config;

pub async fn run_seeders(db: &DatabaseConnection, cfg: &Config) -> Result<(), String> {
    site_seeder::seed_default_site(db, cfg).await?;

    Ok(())
}
