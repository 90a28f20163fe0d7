//! Identifier path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::str::FromStr;

/// Extractor for a single identifier path parameter of any `FromStr` type.
///
/// A segment that does not parse cannot name an existing resource, so the
/// rejection is a 404 rather than a 400.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_order(IdPath(id): IdPath<i64>) -> String {
///     format!("Order ID: {}", id)
/// }
///
/// let app = Router::new().route("/orders/{id}", get(get_order));
/// ```
pub struct IdPath<T>(pub T);

impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: FromStr + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(e.body_text()))?;

        raw.parse::<T>()
            .map(IdPath)
            .map_err(|_| AppError::NotFound(format!("No resource with id '{}'", raw)))
    }
}
