//! MCP server initialization for the stdio transport.

use crate::config::GhostlyConfig;
use crate::memory::store::EpisodeStore;
use crate::tools::GhostlyTools;
use anyhow::{Context, Result};
use rmcp::ServiceExt;
use std::sync::{Arc, Mutex};

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: GhostlyConfig) -> Result<()> {
    tracing::info!("starting Ghostly MCP server on stdio");

    let memory_file = config.resolved_memory_file();
    let store = EpisodeStore::new(&memory_file);
    store
        .ensure_initialized()
        .with_context(|| format!("failed to initialize memory store at {}", memory_file.display()))?;
    tracing::info!(path = %memory_file.display(), "memory store ready");

    let tools = GhostlyTools::new(Arc::new(Mutex::new(store)), Arc::new(config));
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}
