//! API routes module

pub mod info;

use axum::Router;
use core_config::AppInfo;
use domain_products::{handlers, ProductRepository, ProductService};

/// Create all API routes (nested under `/api` by the router builder)
pub fn routes<R>(service: ProductService<R>, app: AppInfo) -> Router
where
    R: ProductRepository + 'static,
{
    Router::new()
        .nest("/products", handlers::router(service))
        .merge(info::router(app))
}
