use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldError};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::models::ProductId;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("Product with SKU '{0}' already exists")]
    DuplicateSku(String),

    #[error("Invalid input: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("Search term is required")]
    MissingSearchTerm,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            ProductError::DuplicateSku(_) => AppError::conflict(
                "Product with this SKU already exists",
                vec![FieldError::new("sku", "SKU must be unique")],
            ),
            ProductError::Validation(errors) => AppError::validation(errors),
            ProductError::MissingSearchTerm => AppError::Validation {
                message: "Search term is required".to_string(),
                errors: vec![FieldError::new("q", "Query parameter q is required")],
            },
            ProductError::Database(msg) => AppError::InternalServerError(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}

/// Map a failed write, turning a unique-index violation on `sku` into a conflict.
pub(crate) fn map_write_error(err: DbErr, sku: Option<&str>) -> ProductError {
    match (err.sql_err(), sku) {
        (Some(SqlErr::UniqueConstraintViolation(_)), Some(sku)) => {
            ProductError::DuplicateSku(sku.to_string())
        }
        _ => err.into(),
    }
}
