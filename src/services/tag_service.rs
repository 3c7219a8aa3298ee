use std::collections::HashMap;

use sea_orm::*;
use slug::slugify;

use crate::entities::{content_tag, status::ContentKind, tag};
use crate::error::AppResult;

pub struct TagService;

impl TagService {
    /// Replace the tag set of one content row. Unknown names are created.
    pub async fn set_tags<C>(db: &C, kind: ContentKind, object_id: i64, names: &[String]) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        content_tag::Entity::delete_many()
            .filter(content_tag::Column::ContentKind.eq(kind))
            .filter(content_tag::Column::ObjectId.eq(object_id))
            .exec(db)
            .await?;

        let mut tag_ids = Vec::with_capacity(names.len());
        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            let tag = Self::find_or_create(db, name).await?;
            if !tag_ids.contains(&tag.id) {
                tag_ids.push(tag.id);
            }
        }

        for tag_id in tag_ids {
            content_tag::ActiveModel {
                id: NotSet,
                tag_id: Set(tag_id),
                content_kind: Set(kind),
                object_id: Set(object_id),
            }
            .insert(db)
            .await?;
        }
        Ok(())
    }

    /// Tag names of one content row, alphabetical.
    pub async fn names<C>(db: &C, kind: ContentKind, object_id: i64) -> AppResult<Vec<String>>
    where
        C: ConnectionTrait,
    {
        let tags = tag::Entity::find()
            .inner_join(content_tag::Entity)
            .filter(content_tag::Column::ContentKind.eq(kind))
            .filter(content_tag::Column::ObjectId.eq(object_id))
            .order_by_asc(tag::Column::Name)
            .all(db)
            .await?;

        Ok(tags.into_iter().map(|t| t.name).collect())
    }

    /// Tag names of many rows of one kind, alphabetical per row.
    pub async fn names_by_object<C>(
        db: &C,
        kind: ContentKind,
        object_ids: &[i64],
    ) -> AppResult<HashMap<i64, Vec<String>>>
    where
        C: ConnectionTrait,
    {
        let mut names: HashMap<i64, Vec<String>> = HashMap::new();
        if object_ids.is_empty() {
            return Ok(names);
        }

        let rows = content_tag::Entity::find()
            .filter(content_tag::Column::ContentKind.eq(kind))
            .filter(content_tag::Column::ObjectId.is_in(object_ids.iter().copied()))
            .find_also_related(tag::Entity)
            .order_by_asc(tag::Column::Name)
            .all(db)
            .await?;

        for (link, tag) in rows {
            if let Some(tag) = tag {
                names.entry(link.object_id).or_default().push(tag.name);
            }
        }
        Ok(names)
    }

    async fn find_or_create<C>(db: &C, name: &str) -> AppResult<tag::Model>
    where
        C: ConnectionTrait,
    {
        if let Some(existing) = tag::Entity::find()
            .filter(tag::Column::Name.eq(name))
            .one(db)
            .await?
        {
            return Ok(existing);
        }

        let created = tag::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            slug: Set(slugify(name)),
        }
        .insert(db)
        .await?;
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_db;

    #[tokio::test]
    async fn set_tags_replaces_and_deduplicates() {
        let (db, _dir) = setup_db().await;

        let first = vec!["Rust".to_string(), "Web".to_string(), "Rust".to_string()];
        TagService::set_tags(&db, ContentKind::Article, 1, &first).await.unwrap();
        assert_eq!(TagService::names(&db, ContentKind::Article, 1).await.unwrap(), vec!["Rust", "Web"]);

        let second = vec!["Databases".to_string(), "Rust".to_string()];
        TagService::set_tags(&db, ContentKind::Article, 1, &second).await.unwrap();
        assert_eq!(
            TagService::names(&db, ContentKind::Article, 1).await.unwrap(),
            vec!["Databases", "Rust"]
        );

        // Same id, other table
        assert!(TagService::names(&db, ContentKind::Page, 1).await.unwrap().is_empty());
        assert_eq!(tag::Entity::find().count(&db).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn names_by_object_groups_one_kind() {
        let (db, _dir) = setup_db().await;

        TagService::set_tags(&db, ContentKind::Page, 1, &["Zeta".to_string(), "Alpha".to_string()]).await.unwrap();
        TagService::set_tags(&db, ContentKind::Page, 2, &["Beta".to_string()]).await.unwrap();
        TagService::set_tags(&db, ContentKind::Section, 1, &["Other".to_string()]).await.unwrap();

        let names = TagService::names_by_object(&db, ContentKind::Page, &[1, 2, 3]).await.unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names[&1], vec!["Alpha", "Zeta"]);
        assert_eq!(names[&2], vec!["Beta"]);

        assert!(TagService::names_by_object(&db, ContentKind::Page, &[]).await.unwrap().is_empty());
    }
}
