//! API error type and its actix `ResponseError` mapping.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{}", _0)]
    Conflict(String),
    #[display(fmt = "{}", _0)]
    NotFound(String),
    #[display(fmt = "Validation failed: {}", _0)]
    Validation(ValidationErrors),
    #[display(fmt = "Invalid request body: {}", _0)]
    InvalidPayload(String),
    #[display(fmt = "Database error: {}", _0)]
    Database(sqlx::Error),
}

impl ApiError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        ApiError::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Database(e)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        ApiError::Validation(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::InvalidPayload(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Conflict(msg) | ApiError::NotFound(msg) => json!({ "detail": msg }),
            ApiError::Validation(errors) => json!({
                "detail": "Validation failed",
                "errors": errors,
            }),
            ApiError::InvalidPayload(msg) => json!({ "detail": msg }),
            ApiError::Database(e) => {
                error!(error = %e, "Database operation failed");
                json!({ "detail": "Internal Server Error" })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
