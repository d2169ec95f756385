//! Tria contacts server - main entry point
//!
//! Serves a local, file-backed address book over the Model Context Protocol.

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tria_contacts::repositories::{
    ContactRepository, JsonContactRepository, JsonFileStore, JsonTagRepository, TagRepository,
};
use tria_contacts::{Config, TriaMcpServer};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can apply
    let config = Config::from_env();
    let default_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());

    // stderr only; stdout carries MCP traffic
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(data_dir = %config.data_dir.display(), "Starting Tria contacts server");

    let store = Arc::new(JsonFileStore::open(&config.data_dir).await?);
    if !store.is_available().await {
        error!(data_dir = %config.data_dir.display(), "Data directory is not writable");
        anyhow::bail!("data directory {} is not writable", config.data_dir.display());
    }

    let contact_repo =
        Arc::new(JsonContactRepository::new(store.clone())) as Arc<dyn ContactRepository>;
    let tag_repo = Arc::new(JsonTagRepository::new(store)) as Arc<dyn TagRepository>;

    let server = TriaMcpServer::new(contact_repo, tag_repo, &config);

    info!(
        threshold = config.search_threshold,
        max_results = config.search_max_results,
        "Search configured"
    );

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    tria_contacts::server::run_server(server).await?;

    info!("Tria contacts server shutdown complete");
    Ok(())
}
