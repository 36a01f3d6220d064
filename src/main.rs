//! Study Catalog MCP Server - Main entry point
//!
//! Serves the study-materials catalog over the Model Context Protocol on stdio.

use anyhow::Result;
use std::sync::Arc;
use study_catalog_mcp::client::{AsyncCatalogClient, AsyncCatalogClientImpl};
use study_catalog_mcp::repositories::Repositories;
use study_catalog_mcp::services::{CatalogService, CatalogServiceImpl, CatalogSettings};
use study_catalog_mcp::{CatalogClient, CatalogMcpServer, Config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // LOG_LEVEL may come from .env
    let _ = dotenvy::dotenv();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(std::env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string()))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("Starting Study Catalog MCP Server with API URL: {}", config.api_url);
    if config.user_id.is_none() {
        info!("No CATALOG_USER_ID set; purchase status and purchased notes are unavailable");
    }

    // Initialize catalog client
    let sync_client = CatalogClient::new(&config);
    let metrics = sync_client.metrics().clone();
    let client =
        Arc::new(AsyncCatalogClientImpl::new(sync_client)) as Arc<dyn AsyncCatalogClient>;

    let repos = Repositories::rest(client);
    let service = Arc::new(CatalogServiceImpl::new(
        repos,
        CatalogSettings::from(&config),
        metrics.clone(),
    )?) as Arc<dyn CatalogService>;

    let server = CatalogMcpServer::new(service);

    info!(
        "Cache TTL: {} seconds, max results: {}",
        config.cache_ttl_secs, config.max_search_results
    );

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    study_catalog_mcp::server::run_server(server).await?;

    info!("Session metrics: {}", metrics.summary());
    info!("Study Catalog MCP Server shutdown complete");
    Ok(())
}
