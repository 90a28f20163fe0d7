//! Server infrastructure module.
//!
//! - Router assembly with OpenAPI documentation
//! - `/health` endpoint
//! - Graceful shutdown on SIGTERM/SIGINT
//! - Database connection cleanup
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{close_database, create_production_app, create_router, health_router};
//! use axum_helpers::CorsOrigins;
//! use core_config::{server::ServerConfig, app_info};
//! use std::time::Duration;
//!
//! let router = create_router::<ApiDoc>(api_routes, &CorsOrigins::Any)
//!     .merge(health_router(app_info!()));
//!
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), close_database(db, "products")).await?;
//! ```

pub mod app;
pub mod cleanup;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use cleanup::close_database;
pub use health::{HealthResponse, health_router};
pub use shutdown::shutdown_signal;
