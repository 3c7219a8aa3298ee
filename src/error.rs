use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::utils::api_response::ResponseBuilder;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    /// A row is still referenced by rows that protect it from deletion.
    #[error("{0}")]
    Protected(String),

    /// Stored data breaks an invariant the schema is supposed to hold.
    #[error("Site {site_id} has more than one value for '{name}'")]
    Integrity { site_id: i64, name: String },

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Classify a failed write: constraint violations become client errors,
    /// everything else stays a database error.
    pub fn from_write(err: DbErr, what: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict(format!("{} already exists", what))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::Protected(format!("{} is referenced by other records", what))
            }
            _ => AppError::Database(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::Protected(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Integrity { .. } | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "ALREADY_EXISTS",
            AppError::Protected(_) => "PROTECTED",
            AppError::Integrity { .. } => "DATA_CORRUPT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "DB_ERR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        }
        // Driver messages stay in the log
        let message = match &self {
            AppError::Database(_) => "Database error".to_string(),
            other => other.to_string(),
        };
        ResponseBuilder::error(status, self.code(), &message).into_response()
    }
}
