//! MCP server - JSON-RPC over stdio
//!
//! Stdout carries protocol messages only; all logging goes to stderr.

use core_config::tracing::{LogOutput, init_tracing_with_output, install_color_eyre};
use domain_products::{InMemoryProductRepository, ProductService, ValidationRules, seed};
use joke_mcp::{JokeClient, McpHandler, serve_stdio};
use tracing::info;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing_with_output(&config.environment, LogOutput::Stderr);

    info!(
        name = config.app.name,
        version = config.app.version,
        joke_api = %config.joke.base_url,
        "Starting MCP server"
    );

    let client = JokeClient::new(config.joke.clone()).init()?;

    let service = ProductService::new(InMemoryProductRepository::new(), ValidationRules::IN_MEMORY);
    if config.seed_data {
        let inserted = seed::seed_if_empty(&service)
            .await
            .map_err(|e| eyre::eyre!("Failed to seed products: {}", e))?;
        info!(inserted, "Catalog seeded");
    }

    let handler = McpHandler::new(client).with_catalog(service);
    serve_stdio(&handler).await?;

    info!("MCP server shutdown complete");
    Ok(())
}
