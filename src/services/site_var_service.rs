use sea_orm::*;

use crate::content::site_context::SiteContext;
use crate::entities::{site, site_var};
use crate::error::{AppError, AppResult};

pub struct SiteVarService;

impl SiteVarService {
    /// The stored row for `(site_id, name)`. More than one row is an
    /// integrity error.
    pub async fn find<C>(db: &C, site_id: i64, name: &str) -> AppResult<Option<site_var::Model>>
    where
        C: ConnectionTrait,
    {
        let mut rows = site_var::Entity::find()
            .filter(site_var::Column::SiteId.eq(site_id))
            .filter(site_var::Column::Name.eq(name))
            .limit(2)
            .all(db)
            .await?;

        if rows.len() > 1 {
            return Err(AppError::Integrity { site_id, name: name.to_string() });
        }
        Ok(rows.pop())
    }

    /// Stored value passed through `parse`, or `parse(default)` when nothing
    /// is stored.
    pub async fn get_value<C, T>(
        db: &C,
        site_id: i64,
        name: &str,
        default: &str,
        parse: impl FnOnce(&str) -> T,
    ) -> AppResult<T>
    where
        C: ConnectionTrait,
    {
        Ok(match Self::find(db, site_id, name).await? {
            Some(row) => parse(&row.value),
            None => parse(default),
        })
    }

    pub async fn load_context<C>(db: &C, site: site::Model) -> AppResult<SiteContext>
    where
        C: ConnectionTrait,
    {
        let rows = Self::list(db, site.id).await?;
        SiteContext::from_rows(site, rows)
    }

    pub async fn list<C>(db: &C, site_id: i64) -> AppResult<Vec<site_var::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(site_var::Entity::find()
            .filter(site_var::Column::SiteId.eq(site_id))
            .order_by_asc(site_var::Column::Name)
            .all(db)
            .await?)
    }

    /// Insert or overwrite a variable.
    pub async fn set_value(
        db: &DatabaseConnection,
        site_id: i64,
        name: String,
        value: String,
    ) -> AppResult<site_var::Model> {
        let existing = site_var::Entity::find()
            .filter(site_var::Column::SiteId.eq(site_id))
            .filter(site_var::Column::Name.eq(&name))
            .one(db)
            .await?;

        let saved = match existing {
            Some(row) => {
                let mut active: site_var::ActiveModel = row.into();
                active.value = Set(value);
                active.update(db).await?
            }
            None => site_var::ActiveModel {
                id: NotSet,
                site_id: Set(site_id),
                name: Set(name),
                value: Set(value),
            }
            .insert(db)
            .await
            .map_err(|e| AppError::from_write(e, "Site variable"))?,
        };

        tracing::info!(site_id, name = %saved.name, "Site variable saved");
        Ok(saved)
    }

    pub async fn delete(db: &DatabaseConnection, site_id: i64, name: &str) -> AppResult<()> {
        let result = site_var::Entity::delete_many()
            .filter(site_var::Column::SiteId.eq(site_id))
            .filter(site_var::Column::Name.eq(name))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Site variable"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_site, setup_db};

    #[tokio::test]
    async fn get_value_uses_stored_value_or_default() {
        let (db, _dir) = setup_db().await;
        let site = create_site(&db, "example.com", "Example").await;

        let missing = SiteVarService::get_value(&db, site.id, "items_per_page", "10", |v| v.parse::<u32>().unwrap())
            .await
            .unwrap();
        assert_eq!(missing, 10);

        SiteVarService::set_value(&db, site.id, "items_per_page".into(), "25".into()).await.unwrap();
        let stored = SiteVarService::get_value(&db, site.id, "items_per_page", "10", |v| v.parse::<u32>().unwrap())
            .await
            .unwrap();
        assert_eq!(stored, 25);

        let empty_default = SiteVarService::get_value(&db, site.id, "analytics_id", "", str::to_string)
            .await
            .unwrap();
        assert_eq!(empty_default, "");
    }

    #[tokio::test]
    async fn set_value_overwrites_and_is_site_scoped() {
        let (db, _dir) = setup_db().await;
        let first = create_site(&db, "one.example", "One").await;
        let second = create_site(&db, "two.example", "Two").await;

        SiteVarService::set_value(&db, first.id, "default_icon".into(), "star".into()).await.unwrap();
        SiteVarService::set_value(&db, first.id, "default_icon".into(), "moon".into()).await.unwrap();

        let vars = SiteVarService::list(&db, first.id).await.unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].value, "moon");

        let other = SiteVarService::get_value(&db, second.id, "default_icon", "none", str::to_string)
            .await
            .unwrap();
        assert_eq!(other, "none");

        let ctx = SiteVarService::load_context(&db, first).await.unwrap();
        assert_eq!(ctx.var("default_icon"), Some("moon"));
    }

    #[tokio::test]
    async fn duplicate_rows_surface_as_integrity_error() {
        let (db, _dir) = setup_db().await;
        let site = create_site(&db, "example.com", "Example").await;

        // Rows written before the unique index existed
        db.execute_unprepared("DROP INDEX uq_site_vars_site_id_name").await.unwrap();
        for value in ["ACME", "Globex"] {
            site_var::ActiveModel {
                id: NotSet,
                site_id: Set(site.id),
                name: Set("copyright_holder".into()),
                value: Set(value.into()),
            }
            .insert(&db)
            .await
            .unwrap();
        }

        let err = SiteVarService::get_value(&db, site.id, "copyright_holder", "", str::to_string)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Integrity { ref name, .. } if name == "copyright_holder"));

        let err = SiteVarService::load_context(&db, site).await.unwrap_err();
        assert!(matches!(err, AppError::Integrity { .. }));
    }

    #[tokio::test]
    async fn deleting_missing_variable_is_not_found() {
        let (db, _dir) = setup_db().await;
        let site = create_site(&db, "example.com", "Example").await;

        let err = SiteVarService::delete(&db, site.id, "nope").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
