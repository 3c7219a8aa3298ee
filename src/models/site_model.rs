use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct SetSiteVarRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SiteVarResponse {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SiteResponse {
    pub id: i64,
    pub domain: String,
    pub name: String,
    pub vars: Vec<SiteVarResponse>,
}
