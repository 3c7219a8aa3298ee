//! Shared fixtures for service tests: a migrated SQLite database per test.

use chrono::{DateTime, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::*;
use tempfile::TempDir;

use crate::entities::{image_file, site};

/// Fresh database in its own temp directory. Keep the `TempDir` alive for
/// the duration of the test.
pub async fn setup_db() -> (DatabaseConnection, TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
    let db = Database::connect(&url).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    (db, dir)
}

pub async fn create_site(db: &DatabaseConnection, domain: &str, name: &str) -> site::Model {
    site::ActiveModel {
        id: NotSet,
        domain: Set(domain.to_string()),
        name: Set(name.to_string()),
    }
    .insert(db)
    .await
    .expect("insert site")
}

pub async fn create_image(db: &DatabaseConnection, name: &str, uploaded_at: DateTime<Utc>) -> image_file::Model {
    image_file::ActiveModel {
        id: NotSet,
        public_id: Set(uuid::Uuid::now_v7()),
        name: Set(name.to_string()),
        url: Set(format!("https://cdn.example.com/{}.jpg", name)),
        description: Set(String::new()),
        default_alt_text: Set(format!("{} alt", name)),
        width: Set(Some(800)),
        height: Set(Some(600)),
        mime_type: Set("image/jpeg".to_string()),
        size: Set(1024),
        date_taken: Set(None),
        uploaded_at: Set(uploaded_at),
        custom_copyright_notice: Set(String::new()),
    }
    .insert(db)
    .await
    .expect("insert image")
}
