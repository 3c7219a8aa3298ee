use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::Utc;

use crate::config::AppState;
use crate::content::{site_context::SiteContext, SectionedArticle};
use crate::entities::{page, section};
use crate::error::{AppError, AppResult};
use crate::models::content_model::*;
use crate::models::menu_model::SectionMenuParams;
use crate::services::content_service::ContentService;
use crate::services::menu_service::MenuService;
use crate::services::site_var_service::SiteVarService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::current_site::CurrentSite;
use crate::utils::validated_wrapper::ValidatedJson;

async fn site_context(state: &AppState, site: crate::entities::site::Model) -> AppResult<SiteContext> {
    SiteVarService::load_context(&state.db, site).await
}

pub async fn get_home_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let ctx = site_context(&state, site).await?;
    let home = ContentService::latest_home_page(&state.db, ctx.site.id, now)
        .await?
        .ok_or(AppError::NotFound("Home page"))?;

    let res = ContentService::render(&state.db, &home, &ctx, &state.config.pagebreak_separator, now).await?;
    Ok(ResponseBuilder::success("HOME_FETCHED", "Success", res))
}

pub async fn create_home_page_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    ValidatedJson(payload): ValidatedJson<CreateHomePageRequest>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let ctx = site_context(&state, site).await?;
    let home = ContentService::create_home_page(&state.db, ctx.site.id, payload, &state.config.default_locale).await?;

    let res = ContentService::render(&state.db, &home, &ctx, &state.config.pagebreak_separator, now).await?;
    Ok(ResponseBuilder::created("HOME_PAGE_CREATED", "Home page created", res))
}

pub async fn section_menu_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Query(params): Query<SectionMenuParams>,
) -> AppResult<impl IntoResponse> {
    let ctx = site_context(&state, site).await?;
    let pages: Vec<String> = params
        .pages
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|slug| !slug.is_empty())
        .map(str::to_string)
        .collect();

    let res = MenuService::section_menu(&state.db, &ctx, params.title, &pages, Utc::now()).await?;
    Ok(ResponseBuilder::success("SECTION_MENU_FETCHED", "Success", res))
}

pub async fn list_sections_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let ctx = site_context(&state, site).await?;
    let (page, limit) = params.resolve(state.config.page_size);
    let (sections, meta) = ContentService::list_live::<section::Entity>(&state.db, ctx.site.id, now, page, limit).await?;

    let data = ContentService::render_many(&state.db, &sections, &ctx, &state.config.pagebreak_separator, now).await?;
    Ok(ResponseBuilder::page("SECTIONS_FETCHED", data, meta))
}

pub async fn create_section_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    ValidatedJson(payload): ValidatedJson<CreateSectionRequest>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let ctx = site_context(&state, site).await?;
    let section = ContentService::create_section(&state.db, ctx.site.id, payload, &state.config.default_locale).await?;

    let res = ContentService::render(&state.db, &section, &ctx, &state.config.pagebreak_separator, now).await?;
    Ok(ResponseBuilder::created("SECTION_CREATED", "Section created", res))
}

pub async fn get_section_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let ctx = site_context(&state, site).await?;
    let section = ContentService::get_section(&state.db, ctx.site.id, &slug, now).await?;

    let res = ContentService::render(&state.db, &section, &ctx, &state.config.pagebreak_separator, now).await?;
    Ok(ResponseBuilder::success("SECTION_FETCHED", "Success", res))
}

pub async fn delete_section_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    ContentService::delete_section(&state.db, site.id, &slug).await?;
    Ok(ResponseBuilder::done("SECTION_DELETED", "Section deleted"))
}

pub async fn list_section_articles_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let ctx = site_context(&state, site).await?;
    let (page, limit) = params.resolve(state.config.page_size);
    let (section, articles, meta) =
        ContentService::list_section_articles(&state.db, ctx.site.id, &slug, now, page, limit).await?;

    let items: Vec<SectionedArticle> = articles
        .into_iter()
        .map(|article| SectionedArticle { article, section: section.clone() })
        .collect();
    let mut data = ContentService::render_many(&state.db, &items, &ctx, &state.config.pagebreak_separator, now).await?;
    for res in &mut data {
        res.section = Some(SectionSummary::new(&section, &ctx));
    }
    Ok(ResponseBuilder::page("ARTICLES_FETCHED", data, meta))
}

pub async fn create_article_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    ValidatedJson(payload): ValidatedJson<CreateArticleRequest>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let ctx = site_context(&state, site).await?;
    let item = ContentService::create_article(&state.db, ctx.site.id, payload, &state.config.default_locale).await?;

    let res = ContentService::render_article(&state.db, &item, &ctx, &state.config.pagebreak_separator, now).await?;
    Ok(ResponseBuilder::created("ARTICLE_CREATED", "Article created", res))
}

pub async fn get_article_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path((section_slug, slug)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let ctx = site_context(&state, site).await?;
    let item = ContentService::get_article(&state.db, ctx.site.id, &section_slug, &slug, now).await?;

    let res = ContentService::render_article(&state.db, &item, &ctx, &state.config.pagebreak_separator, now).await?;
    Ok(ResponseBuilder::success("ARTICLE_FETCHED", "Success", res))
}

pub async fn list_pages_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let ctx = site_context(&state, site).await?;
    let (page, limit) = params.resolve(state.config.page_size);
    let (pages, meta) = ContentService::list_live::<page::Entity>(&state.db, ctx.site.id, now, page, limit).await?;

    let data = ContentService::render_many(&state.db, &pages, &ctx, &state.config.pagebreak_separator, now).await?;
    Ok(ResponseBuilder::page("PAGES_FETCHED", data, meta))
}

pub async fn create_page_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    ValidatedJson(payload): ValidatedJson<CreatePageRequest>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let ctx = site_context(&state, site).await?;
    let page = ContentService::create_page(&state.db, ctx.site.id, payload, &state.config.default_locale).await?;

    let res = ContentService::render(&state.db, &page, &ctx, &state.config.pagebreak_separator, now).await?;
    Ok(ResponseBuilder::created("PAGE_CREATED", "Page created", res))
}

pub async fn get_page_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let ctx = site_context(&state, site).await?;
    let page = ContentService::get_page(&state.db, ctx.site.id, &slug, now).await?;

    let res = ContentService::render(&state.db, &page, &ctx, &state.config.pagebreak_separator, now).await?;
    Ok(ResponseBuilder::success("PAGE_FETCHED", "Success", res))
}

pub async fn create_series_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    ValidatedJson(payload): ValidatedJson<CreateSeriesRequest>,
) -> AppResult<impl IntoResponse> {
    let series = ContentService::create_series(&state.db, site.id, payload).await?;
    Ok(ResponseBuilder::created("SERIES_CREATED", "Series created", SeriesSummary::from(&series)))
}

pub async fn get_series_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let ctx = site_context(&state, site).await?;
    let (series, articles) = ContentService::get_series(&state.db, ctx.site.id, &slug, now).await?;

    let mut rendered = ContentService::render_many(&state.db, &articles, &ctx, &state.config.pagebreak_separator, now).await?;
    for (res, item) in rendered.iter_mut().zip(&articles) {
        res.section = Some(SectionSummary::new(&item.section, &ctx));
        res.series = Some(SeriesSummary::from(&series));
    }

    let res = SeriesResponse {
        url: series.url(&ctx),
        name: series.name,
        slug: series.slug,
        description: series.description,
        articles: rendered,
    };
    Ok(ResponseBuilder::success("SERIES_FETCHED", "Success", res))
}

pub async fn delete_series_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    ContentService::delete_series(&state.db, site.id, &slug).await?;
    Ok(ResponseBuilder::done("SERIES_DELETED", "Series deleted"))
}
