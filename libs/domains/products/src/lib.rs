//! Products Domain
//!
//! A product catalog with two interchangeable stores: an in-memory map keyed
//! by UUIDs and a relational table (SQLite or Postgres through sea-orm) with
//! integer ids.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, sku rules, query parsing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + in-memory and sea-orm implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, inputs, ids
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers, InMemoryProductRepository, ProductService, ValidationRules,
//! };
//!
//! let service = ProductService::new(InMemoryProductRepository::new(), ValidationRules::IN_MEMORY);
//! let router: axum::Router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod query;
pub mod repository;
pub mod seed;
pub mod service;
pub mod sql;
pub mod validation;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{CategoryList, NewProduct, Product, ProductChanges, ProductId, ProductPayload};
pub use query::{ProductListParams, ProductQuery, SortField, SortOrder};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
pub use sql::SqlProductRepository;
pub use validation::{ProductField, ValidationRules};
