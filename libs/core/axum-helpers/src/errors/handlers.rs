use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use super::ErrorResponse;

/// Fallback handler rendering unknown routes through the error envelope.
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!("No route for {}", uri.path());
    let body = Json(ErrorResponse::new("The requested resource was not found", None));

    (StatusCode::NOT_FOUND, body).into_response()
}
