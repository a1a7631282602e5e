use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use anishelf_core::{CatalogError, CatalogErrorKind};

pub type AppResult<T> = Result<T, AppError>;

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Error rendered to clients as `{"message": ...}` with the given status.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = axum::Json(json!({ "message": self.message }));
        (self.status, body).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err.kind() {
            CatalogErrorKind::NotFound => Self::not_found(err.to_string()),
            CatalogErrorKind::Conflict => Self::conflict(err.to_string()),
            CatalogErrorKind::BadRequest | CatalogErrorKind::Validation => {
                Self::bad_request(err.to_string())
            }
            CatalogErrorKind::Internal => {
                tracing::error!(error = %err, "catalog operation failed");
                Self::internal(INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match &rejection {
            JsonRejection::MissingJsonContentType(_) => Self::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                rejection.body_text(),
            ),
            // Syntax and shape errors are both client mistakes.
            JsonRejection::JsonDataError(_)
            | JsonRejection::JsonSyntaxError(_) => {
                Self::bad_request(rejection.body_text())
            }
            _ => Self::new(rejection.status(), rejection.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
