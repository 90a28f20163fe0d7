//! Products API - REST server

use axum_helpers::{close_database, create_production_app};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::sql::{check_health, connect_from_config_with_retry, run_migrations};
use domain_products::{
    InMemoryProductRepository, ProductService, SqlProductRepository, ValidationRules,
};
use migration::Migrator;
use products_api::config::{Config, StoreKind};
use products_api::{build_app, prepare_service};
use std::time::Duration;
use tracing::info;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(store = %config.store, "Starting Products API");

    let result = match config.store {
        StoreKind::Sql => {
            info!("Connecting to database at {}", config.database.url());
            let db = connect_from_config_with_retry(config.database.clone(), None)
                .await
                .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;
            run_migrations::<Migrator>(&db, config.app.name).await?;
            check_health(&db).await?;

            let service = ProductService::new(
                SqlProductRepository::new(db.clone()),
                ValidationRules::PERSISTED,
            );
            let service = prepare_service(service, &config).await?;
            let app = build_app(service, &config);

            create_production_app(
                app,
                &config.server,
                SHUTDOWN_TIMEOUT,
                close_database(db, "products"),
            )
            .await
        }
        StoreKind::Memory => {
            let service =
                ProductService::new(InMemoryProductRepository::new(), ValidationRules::IN_MEMORY);
            let service = prepare_service(service, &config).await?;
            let app = build_app(service, &config);

            create_production_app(app, &config.server, SHUTDOWN_TIMEOUT, async {
                info!("In-memory store dropped");
            })
            .await
        }
    };

    result.map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
