use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;
use crate::shared::validation::FieldErrors;

/// Conditions reported by the catalog layers. Only [`IntoResponse`] turns them
/// into HTTP statuses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error")]
    Validation(FieldErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.into())
    }
}

/// Internal detail is only echoed back in debug builds.
fn debug_detail(detail: String) -> Option<String> {
    cfg!(debug_assertions).then_some(detail)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details, message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                    debug_detail(e.to_string()),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None, None),
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                "Validation error".to_string(),
                Some(fields),
                None,
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None, None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, None, None),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                    debug_detail(msg),
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(error, details, message));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
