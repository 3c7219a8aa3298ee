use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait};

use crate::config::Config;
use crate::entities::site;

/// Create the configured default site on an empty database.
pub async fn seed_default_site(db: &DatabaseConnection, cfg: &Config) -> Result<(), String> {
    let count = site::Entity::find().count(db).await.map_err(|e| e.to_string())?;
    if count > 0 {
        return Ok(());
    }

    let new_site = site::ActiveModel {
        id: NotSet,
        domain: Set(cfg.default_site_domain.clone()),
        name: Set(cfg.default_site_name.clone()),
    };
    let saved = new_site.insert(db).await.map_err(|e| e.to_string())?;
    tracing::info!("Seeded site: {} (id {})", saved.domain, saved.id);

    if saved.id != cfg.default_site_id {
        tracing::warn!(
            "DEFAULT_SITE_ID is {} but the seeded site got id {}",
            cfg.default_site_id,
            saved.id
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PAGEBREAK_SEPARATOR;
    use crate::test_utils::setup_db;

    fn config() -> Config {
        Config {
            server_host: "127.0.0.1".into(),
            server_port: 3000,
            database_url: String::new(),
            default_site_id: 1,
            default_site_domain: "example.com".into(),
            default_site_name: "Example".into(),
            pagebreak_separator: DEFAULT_PAGEBREAK_SEPARATOR.into(),
            default_locale: "en_US".into(),
            page_size: 10,
        }
    }

    #[tokio::test]
    async fn seeds_once() {
        let (db, _dir) = setup_db().await;

        seed_default_site(&db, &config()).await.unwrap();
        seed_default_site(&db, &config()).await.unwrap();

        let sites = site::Entity::find().all(&db).await.unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].domain, "example.com");
    }
}
