use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Error,
}

/// Envelope every endpoint answers with. Listings carry `meta` next to `data`.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub status: Outcome,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
}

#[derive(Serialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub title: String,   // validator code, e.g. "length", "invalid_slug"
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        let limit = limit.max(1);
        Self { total, page, limit, total_pages: total.div_ceil(limit) }
    }
}

/// Status code plus envelope, ready to be returned from a handler.
pub struct Reply<T>(pub StatusCode, pub Envelope<T>);

impl<T> IntoResponse for Reply<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}

pub struct ResponseBuilder;

impl ResponseBuilder {
    fn reply<T>(
        status_code: StatusCode,
        outcome: Outcome,
        code: &'static str,
        message: &str,
        data: Option<T>,
        meta: Option<PaginationMeta>,
    ) -> Reply<T> {
        Reply(status_code, Envelope { status: outcome, code, message: message.to_string(), data, meta })
    }

    pub fn success<T: Serialize>(code: &'static str, message: &str, data: T) -> Reply<T> {
        Self::reply(StatusCode::OK, Outcome::Success, code, message, Some(data), None)
    }

    pub fn created<T: Serialize>(code: &'static str, message: &str, data: T) -> Reply<T> {
        Self::reply(StatusCode::CREATED, Outcome::Success, code, message, Some(data), None)
    }

    /// One page of a listing.
    pub fn page<T: Serialize>(code: &'static str, data: Vec<T>, meta: PaginationMeta) -> Reply<Vec<T>> {
        Self::reply(StatusCode::OK, Outcome::Success, code, "Success", Some(data), Some(meta))
    }

    /// A write that leaves nothing to return, such as a delete.
    pub fn done(code: &'static str, message: &str) -> Reply<()> {
        Self::reply(StatusCode::OK, Outcome::Success, code, message, None, None)
    }

    pub fn error(status_code: StatusCode, code: &'static str, message: &str) -> Reply<()> {
        Self::reply(status_code, Outcome::Error, code, message, None, None)
    }

    pub fn fail_with_data<T: Serialize>(
        status_code: StatusCode,
        code: &'static str,
        message: &str,
        data: T,
    ) -> Reply<T> {
        Self::reply(status_code, Outcome::Error, code, message, Some(data), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pages_count_partial_last_page() {
        assert_eq!(PaginationMeta::new(0, 1, 10).total_pages, 0);
        assert_eq!(PaginationMeta::new(10, 1, 10).total_pages, 1);
        assert_eq!(PaginationMeta::new(11, 2, 10).total_pages, 2);
    }

    #[test]
    fn listings_put_meta_beside_data() {
        let Reply(status, body) = ResponseBuilder::page("PAGES_FETCHED", vec!["about"], PaginationMeta::new(1, 1, 10));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "status": "success",
                "code": "PAGES_FETCHED",
                "message": "Success",
                "data": ["about"],
                "meta": {"total": 1, "page": 1, "limit": 10, "total_pages": 1},
            })
        );
    }

    #[test]
    fn deletes_and_errors_omit_data() {
        let Reply(_, body) = ResponseBuilder::done("SECTION_DELETED", "Section deleted");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"status": "success", "code": "SECTION_DELETED", "message": "Section deleted"})
        );

        let Reply(status, body) = ResponseBuilder::error(StatusCode::NOT_FOUND, "NOT_FOUND", "Page not found");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(serde_json::to_value(&body).unwrap()["status"], "error");
    }
}
