use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::config::AppState;
use crate::error::AppResult;
use crate::models::menu_model::*;
use crate::services::menu_service::MenuService;
use crate::services::site_var_service::SiteVarService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::current_site::CurrentSite;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn list_menus_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
) -> AppResult<impl IntoResponse> {
    let res = MenuService::list_menus(&state.db, site.id).await?;
    Ok(ResponseBuilder::success("MENUS_FETCHED", "Success", res))
}

pub async fn create_menu_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    ValidatedJson(payload): ValidatedJson<CreateMenuRequest>,
) -> AppResult<impl IntoResponse> {
    let m = MenuService::create_menu(&state.db, site.id, payload).await?;
    Ok(ResponseBuilder::created(
        "MENU_CREATED",
        "Menu created",
        MenuSummary { id: m.id, admin_name: m.admin_name, slug: m.slug, title: m.title },
    ))
}

pub async fn get_menu_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let ctx = SiteVarService::load_context(&state.db, site).await?;
    let res = MenuService::get_menu(&state.db, &ctx, &slug).await?;
    Ok(ResponseBuilder::success("MENU_FETCHED", "Success", res))
}

pub async fn add_link_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(slug): Path<String>,
    ValidatedJson(payload): ValidatedJson<CreateLinkRequest>,
) -> AppResult<impl IntoResponse> {
    let site_id = site.id;
    MenuService::add_link(&state.db, site_id, &slug, payload).await?;

    let ctx = SiteVarService::load_context(&state.db, site).await?;
    let res = MenuService::get_menu(&state.db, &ctx, &slug).await?;
    Ok(ResponseBuilder::created("LINK_ADDED", "Link added", res))
}
