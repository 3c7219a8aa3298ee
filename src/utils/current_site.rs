use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::HOST, request::Parts},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::config::AppState;
use crate::entities::site;
use crate::error::AppError;

/// Site matching the request's `Host` header, or the configured default site.
pub struct CurrentSite(pub site::Model);

impl<S> FromRequestParts<S> for CurrentSite
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let host = parts
            .headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .map(strip_port);

        if let Some(host) = host {
            let found = site::Entity::find()
                .filter(site::Column::Domain.eq(host))
                .one(&state.db)
                .await?;
            if let Some(site) = found {
                return Ok(CurrentSite(site));
            }
        }

        site::Entity::find_by_id(state.config.default_site_id)
            .one(&state.db)
            .await?
            .map(CurrentSite)
            .ok_or(AppError::NotFound("Site"))
    }
}

fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_port_is_ignored() {
        assert_eq!(strip_port("example.com:8080"), "example.com");
        assert_eq!(strip_port("example.com"), "example.com");
    }
}
