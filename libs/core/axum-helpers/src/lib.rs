//! # Axum Helpers
//!
//! Shared building blocks for the catalog HTTP services.
//!
//! ## Modules
//!
//! - **[`response`]**: success envelope and pagination metadata
//! - **[`errors`]**: `AppError` and the error envelope every failure is rendered through
//! - **[`extractors`]**: id path, JSON body and query extractors that reject with `AppError`
//! - **[`http`]**: CORS configuration
//! - **[`server`]**: router assembly, `/health`, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::{CorsOrigins, create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes, &CorsOrigins::Any)
//!         .merge(health_router(app_info!()));
//!
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

// Re-export server types
pub use server::{
    HealthResponse, close_database, create_production_app, create_router, health_router,
    shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{CorsOrigins, create_cors_layer};

// Re-export envelope types
pub use errors::{AppError, ErrorCode, ErrorResponse, FieldError, field_errors_from};
pub use response::{ApiResponse, Paginated, PaginationMeta, ResponseStatus, Success};

// Re-export extractors
pub use extractors::{IdPath, JsonBody, QueryParams};
