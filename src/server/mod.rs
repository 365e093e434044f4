//! MCP server implementation for the mail server.
//!
//! This module provides the MCP protocol server that exposes the email
//! record and dispatch operations to AI assistants through the Model
//! Context Protocol.

pub mod handlers;

pub use handlers::MailserverMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the mail server with stdio transport.
///
/// This function starts the MCP server and runs it until the client
/// disconnects. It communicates via stdin/stdout using the MCP protocol.
pub async fn run_server(server: MailserverMcpServer) -> Result<()> {
    // Serve the server with stdio transport
    let service = server.serve(stdio()).await?;

    // Wait for completion
    service.waiting().await?;

    Ok(())
}
