use chrono::{DateTime, Utc};
use sea_orm::*;

use crate::content::{
    liveness::{live, live_condition},
    opengraph::ImageProp,
    resolve_icon,
    site_context::SiteContext,
    LiveContent, DEFAULT_LINK_ICON,
};
use crate::entities::{image_file, link, menu, page, section};
use crate::error::{AppError, AppResult};
use crate::models::menu_model::*;
use crate::services::content_service::ContentService;
use crate::services::media_service::MediaService;

pub struct MenuService;

impl MenuService {
    pub async fn create_menu(db: &DatabaseConnection, site_id: i64, payload: CreateMenuRequest) -> AppResult<menu::Model> {
        let saved = menu::ActiveModel {
            id: NotSet,
            site_id: Set(site_id),
            admin_name: Set(payload.admin_name),
            slug: Set(payload.slug),
            title: Set(payload.title),
        }
        .insert(db)
        .await
        .map_err(|e| AppError::from_write(e, "Menu"))?;

        tracing::info!(site_id, slug = %saved.slug, "Menu created");
        Ok(saved)
    }

    pub async fn add_link(
        db: &DatabaseConnection,
        site_id: i64,
        menu_slug: &str,
        payload: CreateLinkRequest,
    ) -> AppResult<link::Model> {
        let menu = Self::find_menu(db, site_id, menu_slug).await?;

        let og_image_id = match payload.og_image {
            Some(public_id) => Some(MediaService::find_image(db, public_id).await?.id),
            None => None,
        };
        let sort_order = match payload.sort_order {
            Some(order) => order,
            None => {
                let last: Option<i32> = link::Entity::find()
                    .select_only()
                    .column(link::Column::SortOrder)
                    .filter(link::Column::MenuId.eq(menu.id))
                    .order_by_desc(link::Column::SortOrder)
                    .into_tuple()
                    .one(db)
                    .await?;
                last.map_or(0, |order| order + 1)
            }
        };
        let title = if payload.title.trim().is_empty() { payload.url.clone() } else { payload.title };

        let saved = link::ActiveModel {
            id: NotSet,
            menu_id: Set(menu.id),
            url: Set(payload.url),
            title: Set(title),
            custom_icon: Set(payload.custom_icon),
            description: Set(payload.description),
            og_image_id: Set(og_image_id),
            sort_order: Set(sort_order),
        }
        .insert(db)
        .await
        .map_err(|e| AppError::from_write(e, "Link"))?;

        tracing::info!(site_id, menu = %menu.slug, url = %saved.url, "Link added");
        Ok(saved)
    }

    pub async fn list_menus(db: &DatabaseConnection, site_id: i64) -> AppResult<Vec<MenuSummary>> {
        let menus = menu::Entity::find()
            .filter(menu::Column::SiteId.eq(site_id))
            .order_by_asc(menu::Column::AdminName)
            .all(db)
            .await?;

        Ok(menus
            .into_iter()
            .map(|m| MenuSummary { id: m.id, admin_name: m.admin_name, slug: m.slug, title: m.title })
            .collect())
    }

    pub async fn get_menu(db: &DatabaseConnection, ctx: &SiteContext, slug: &str) -> AppResult<MenuResponse> {
        let menu = Self::find_menu(db, ctx.site.id, slug).await?;

        let rows = link::Entity::find()
            .filter(link::Column::MenuId.eq(menu.id))
            .order_by_asc(link::Column::SortOrder)
            .order_by_asc(link::Column::Id)
            .find_also_related(image_file::Entity)
            .all(db)
            .await?;

        let links = rows
            .into_iter()
            .map(|(link, image)| LinkResponse {
                id: link.id,
                icon_name: resolve_icon(&link.custom_icon, ctx, DEFAULT_LINK_ICON),
                image: image.as_ref().map(ImageProp::from).into_iter().collect(),
                url: link.url,
                title: link.title,
                description: link.description,
            })
            .collect();

        Ok(MenuResponse {
            id: menu.id,
            admin_name: menu.admin_name,
            slug: menu.slug,
            title: menu.title,
            links,
        })
    }

    /// Navigation built from content: the current home page, every live
    /// section by title, then the requested pages in the order given.
    pub async fn section_menu(
        db: &DatabaseConnection,
        ctx: &SiteContext,
        title: Option<String>,
        page_slugs: &[String],
        now: DateTime<Utc>,
    ) -> AppResult<SectionMenuResponse> {
        let site_id = ctx.site.id;
        let mut links = Vec::new();

        if let Some(home) = ContentService::latest_home_page(db, site_id, now).await? {
            links.push(entry(&home, ctx));
        }

        let sections = section::Entity::find()
            .filter(section::Column::SiteId.eq(site_id))
            .filter(live_condition::<section::Entity>(now))
            .order_by_asc(section::Column::Title)
            .all(db)
            .await?;
        links.extend(sections.iter().map(|s| entry(s, ctx)));

        if !page_slugs.is_empty() {
            let pages = live::<page::Entity>(site_id, now)
                .filter(page::Column::Slug.is_in(page_slugs.iter().cloned()))
                .all(db)
                .await?;
            for slug in page_slugs {
                if let Some(page) = pages.iter().find(|p| &p.slug == slug) {
                    links.push(entry(page, ctx));
                }
            }
        }

        Ok(SectionMenuResponse {
            title: title.filter(|t| !t.is_empty()).unwrap_or_else(|| ctx.site.name.clone()),
            links,
        })
    }

    async fn find_menu(db: &DatabaseConnection, site_id: i64, slug: &str) -> AppResult<menu::Model> {
        menu::Entity::find()
            .filter(menu::Column::SiteId.eq(site_id))
            .filter(menu::Column::Slug.eq(slug))
            .one(db)
            .await?
            .ok_or(AppError::NotFound("Menu"))
    }
}

fn entry<T: LiveContent>(item: &T, ctx: &SiteContext) -> MenuEntry {
    MenuEntry {
        title: item.base().title.to_string(),
        url: item.url(ctx),
        icon_name: item.icon_name(ctx),
    }
}
