//! Products API - REST server over a relational or in-memory product store

pub mod api;
pub mod config;
pub mod openapi;

use axum::Router;
use axum_helpers::{create_router, health_router};
use domain_products::{seed, ProductRepository, ProductService};
use tracing::info;

use config::Config;

/// Full application router: `/api/...`, `/health` and the OpenAPI UI.
pub fn build_app<R>(service: ProductService<R>, config: &Config) -> Router
where
    R: ProductRepository + 'static,
{
    let api_routes = api::routes(service, config.app);
    create_router::<openapi::ApiDoc>(api_routes, &config.cors_origins)
        .merge(health_router(config.app))
}

/// Apply config to a freshly built service and seed it when enabled.
pub async fn prepare_service<R>(
    service: ProductService<R>,
    config: &Config,
) -> eyre::Result<ProductService<R>>
where
    R: ProductRepository,
{
    let service = service.with_default_per_page(config.per_page);

    if config.seed_data {
        let inserted = seed::seed_if_empty(&service)
            .await
            .map_err(|e| eyre::eyre!("Failed to seed products: {}", e))?;
        info!(inserted, "Seed data applied");
    }

    Ok(service)
}
