//! Success envelope shared by every endpoint.
//!
//! ```json
//! { "status": "success", "message": "Product created successfully", "data": { ... } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Discriminator carried by every envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// `{status, message, data?}` body of a successful response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Pagination block of list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub pages: u64,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PaginationMeta {
    pub fn new(page: u64, per_page: u64, total: u64) -> Self {
        let pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };

        Self {
            page,
            per_page,
            total,
            pages,
            has_prev: page > 1,
            has_next: page < pages,
        }
    }
}

/// `data` payload of list responses: one page of items plus its metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

/// A success envelope paired with its HTTP status.
#[derive(Debug)]
pub struct Success<T> {
    status: StatusCode,
    body: ApiResponse<T>,
}

impl<T> Success<T> {
    /// 200 OK with data
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            body: ApiResponse::success(message, data),
        }
    }

    /// 201 Created with data
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            body: ApiResponse::success(message, data),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn into_body(self) -> ApiResponse<T> {
        self.body
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pagination_empty_result() {
        let meta = PaginationMeta::new(1, 20, 0);
        assert_eq!(meta.pages, 0);
        assert!(!meta.has_prev);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_pagination_last_partial_page() {
        let meta = PaginationMeta::new(2, 20, 25);
        assert_eq!(meta.pages, 2);
        assert!(meta.has_prev);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_pagination_first_of_many() {
        let meta = PaginationMeta::new(1, 10, 35);
        assert_eq!(meta.pages, 4);
        assert!(!meta.has_prev);
        assert!(meta.has_next);
    }

    #[test]
    fn test_pagination_page_past_the_end() {
        let meta = PaginationMeta::new(9, 10, 35);
        assert!(meta.has_prev);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::success("ok", json!({"id": 1}))).unwrap();
        assert_eq!(
            body,
            json!({"status": "success", "message": "ok", "data": {"id": 1}})
        );
    }

    #[test]
    fn test_success_status_codes() {
        assert_eq!(Success::ok("ok", 1).status(), StatusCode::OK);
        assert_eq!(Success::created("made", 1).status(), StatusCode::CREATED);
    }
}
