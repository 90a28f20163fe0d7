//! Relational database connector and utilities.
//!
//! One sea-orm connection pool serves both SQLite and PostgreSQL; the backend
//! is picked from the URL scheme.
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::common::RetryConfig;
//! use database::sql::{SqlConfig, connect_from_config_with_retry, run_migrations};
//!
//! let config = SqlConfig::from_env()?;
//! let db = connect_from_config_with_retry(config, Some(RetryConfig::new())).await?;
//! run_migrations::<migration::Migrator>(&db, "products_api").await?;
//! ```

pub mod common;
pub mod sql;

pub use common::{DatabaseError, RetryConfig};
