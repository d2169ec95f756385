//! MCP server for the Tria address book.
//!
//! Exposes contact search, management, tags and import/export to AI
//! assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::TriaMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the MCP server with stdio transport.
///
/// This function starts the MCP server and runs it until the client
/// disconnects. It communicates via stdin/stdout using the MCP protocol.
///
/// # Arguments
/// * `server` - The configured TriaMcpServer instance
pub async fn run_server(server: TriaMcpServer) -> Result<()> {
    let metrics = server.metrics().clone();

    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    tracing::info!("{}", metrics.summary());
    Ok(())
}
