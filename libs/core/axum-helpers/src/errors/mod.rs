pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use crate::response::ResponseStatus;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// One field-level problem. The message always names the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error envelope returned for every failed request.
///
/// ```json
/// {
///   "status": "error",
///   "message": "Validation failed",
///   "errors": [{ "field": "price", "message": "price must be greater than 0" }]
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, errors: Option<Vec<FieldError>>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            errors: errors.filter(|e| !e.is_empty()),
        }
    }
}

/// Flatten `validator` output into field errors, sorted by field name.
pub fn field_errors_from(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                FieldError::new(field.to_string(), message)
            })
        })
        .collect()
}

/// Application error type that can be converted to HTTP responses.
///
/// Only 400, 404, 409 and 500 are ever produced. Server-side failures are
/// logged with their details and rendered with a generic message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        AppError::Validation {
            message: ErrorCode::ValidationError.default_message().to_string(),
            errors,
        }
    }

    pub fn conflict(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        AppError::Conflict {
            message: message.into(),
            errors,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::JsonExtractorRejection(_)
            | AppError::QueryExtractorRejection(_)
            | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
        }
    }

    /// Render the envelope without consuming the HTTP layer.
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            AppError::InternalServerError(_) => {
                ErrorResponse::new(ErrorCode::InternalError.default_message(), None)
            }
            AppError::JsonExtractorRejection(e) => ErrorResponse::new(
                ErrorCode::JsonExtraction.default_message(),
                Some(vec![FieldError::new("body", e.body_text())]),
            ),
            AppError::QueryExtractorRejection(e) => ErrorResponse::new(
                ErrorCode::InvalidQuery.default_message(),
                Some(vec![FieldError::new("query", e.body_text())]),
            ),
            AppError::Validation { message, errors } => {
                ErrorResponse::new(message.clone(), Some(errors.clone()))
            }
            AppError::NotFound(msg) => ErrorResponse::new(msg.clone(), None),
            AppError::Conflict { message, errors } => {
                ErrorResponse::new(message.clone(), Some(errors.clone()))
            }
        }
    }

    fn error_code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) => ErrorCode::JsonExtraction,
            AppError::QueryExtractorRejection(_) => ErrorCode::InvalidQuery,
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Conflict { .. } => ErrorCode::Conflict,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), error_kind = %code, "{:?}", self);
        } else {
            tracing::info!(error_code = code.code(), error_kind = %code, "{}", self);
        }

        (status, Json(self.to_error_response())).into_response()
    }
}
