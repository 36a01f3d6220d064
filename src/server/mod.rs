//! MCP server for the study catalog.
//!
//! This module provides the MCP protocol server that exposes catalog search
//! to AI assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::CatalogMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the catalog MCP server with stdio transport.
///
/// This function starts the MCP server and runs it until the client
/// disconnects. It communicates via stdin/stdout using the MCP protocol.
///
/// # Returns
/// An error if the server fails to start or encounters a fatal error
pub async fn run_server(server: CatalogMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
