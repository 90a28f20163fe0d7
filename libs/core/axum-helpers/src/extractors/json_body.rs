//! JSON body extractor with enveloped rejections.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// Drop-in replacement for `axum::Json` whose rejection is a 400 error envelope.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::JsonBody;
/// use serde_json::Value;
///
/// async fn create(JsonBody(payload): JsonBody<Value>) -> String {
///     payload.to_string()
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(data))
    }
}
