use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::SqlErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::response::ApiResponse;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error")]
    Db(#[from] sqlx::Error),

    #[error("Database error")]
    Orm(sea_orm::DbErr),

    #[error("Storage timeout")]
    Timeout,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

// The database unique constraints are the sole source of truth for 409s;
// everything else stays an opaque storage error.
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("Resource already exists".to_string())
            }
            _ => AppError::Orm(err),
        }
    }
}

/// Remap a unique-constraint violation to an entity-specific 409 message.
pub fn on_unique(message: &'static str) -> impl Fn(sea_orm::DbErr) -> AppError {
    move |err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(message.to_string()),
        _ => AppError::Orm(err),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Db(_) | AppError::Orm(_) | AppError::Timeout | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        match &self {
            AppError::Db(err) => tracing::error!(error = %err, "storage error"),
            AppError::Orm(err) => tracing::error!(error = %err, "storage error"),
            AppError::Internal(err) => tracing::error!(error = %err, "internal error"),
            AppError::Timeout => tracing::error!("storage call timed out"),
            _ => {}
        }

        let details = match &self {
            AppError::Validation(details) => Some(details.clone()),
            _ => None,
        };

        let body = ApiResponse::<serde_json::Value>::failure(self.to_string(), details);
        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
