//! precache MCP server entry point.
//!
//! Boots the offline cache manager and exposes its lifecycle as MCP tools on
//! stdio transport. Logging goes to stderr to avoid interfering with the
//! JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use precache_client::{FetchClient, FetchConfig};
use precache_core::{AppConfig, CacheDb, OfflineCacheManager};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let worker_config = config.worker_config()?;
    let origin = config.origin_url()?;

    let db = CacheDb::open(&config.db_path).await?;
    let client = FetchClient::new(FetchConfig::from(&config))?;
    let manager = OfflineCacheManager::new(worker_config, db, Arc::new(client));

    tracing::info!(
        generation = %manager.generation(),
        db_path = %config.db_path.display(),
        "Starting precache server on stdio transport"
    );

    let handler = handler::PrecacheServer::new(Arc::new(manager), origin);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
