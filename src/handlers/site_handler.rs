use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::config::AppState;
use crate::entities::site_var;
use crate::error::{AppError, AppResult};
use crate::models::site_model::*;
use crate::services::site_var_service::SiteVarService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::current_site::CurrentSite;
use crate::utils::validated_wrapper::ValidatedJson;

fn var_response(var: site_var::Model) -> SiteVarResponse {
    SiteVarResponse { name: var.name, value: var.value }
}

pub async fn get_site_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
) -> AppResult<impl IntoResponse> {
    let vars = SiteVarService::list(&state.db, site.id).await?;
    let res = SiteResponse {
        id: site.id,
        domain: site.domain,
        name: site.name,
        vars: vars.into_iter().map(var_response).collect(),
    };
    Ok(ResponseBuilder::success("SITE_FETCHED", "Success", res))
}

pub async fn list_site_vars_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
) -> AppResult<impl IntoResponse> {
    let vars = SiteVarService::list(&state.db, site.id).await?;
    let res: Vec<SiteVarResponse> = vars.into_iter().map(var_response).collect();
    Ok(ResponseBuilder::success("SITE_VARS_FETCHED", "Success", res))
}

pub async fn get_site_var_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let var = SiteVarService::find(&state.db, site.id, &name)
        .await?
        .ok_or(AppError::NotFound("Site variable"))?;
    Ok(ResponseBuilder::success("SITE_VAR_FETCHED", "Success", var_response(var)))
}

pub async fn set_site_var_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    ValidatedJson(payload): ValidatedJson<SetSiteVarRequest>,
) -> AppResult<impl IntoResponse> {
    let var = SiteVarService::set_value(&state.db, site.id, payload.name, payload.value).await?;
    Ok(ResponseBuilder::success("SITE_VAR_SAVED", "Site variable saved", var_response(var)))
}

pub async fn delete_site_var_handler(
    State(state): State<AppState>,
    CurrentSite(site): CurrentSite,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    SiteVarService::delete(&state.db, site.id, &name).await?;
    Ok(ResponseBuilder::done("SITE_VAR_DELETED", "Site variable deleted"))
}
