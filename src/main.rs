//! Freshgate - MCP server for the Freshdesk helpdesk
//!
//! This binary runs as an MCP server using stdio transport, exposing
//! Freshdesk tickets, contacts, agents and companies as tools.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `FRESHDESK_DOMAIN`: `acme`, `acme.freshdesk.com` or a full URL
//! - `FRESHDESK_API_KEY`: API key of the agent the server acts as
//! - `FRESHDESK_ACCESS_LEVEL` / `FRESHDESK_PERMISSIONS`: what callers may do
//!
//! # Usage
//!
//! ```bash
//! FRESHDESK_DOMAIN=acme FRESHDESK_API_KEY=xxx FRESHDESK_ACCESS_LEVEL=read \
//!     FRESHDESK_PERMISSIONS=tickets:read ./freshgate
//! ```

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, EnvFilter};

use freshgate::{client, config, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // stdout is reserved for MCP JSON-RPC messages
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("freshgate=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting Freshgate MCP server v{}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::from_env().context("Failed to load configuration")?;

    match &config.grant {
        Some(grant) => tracing::info!(
            level = %grant.level(),
            permissions = grant.permissions().len(),
            "Access grant loaded"
        ),
        None => tracing::warn!("No access grant configured; all tools except ping will be denied"),
    }

    let client = client::FreshdeskClient::new(&config).context("Failed to create Freshdesk client")?;

    tracing::debug!(base_url = %client.base_url(), "Freshdesk client initialized");

    tracing::info!("Testing connection to Freshdesk...");
    if let Err(e) = client.test_connection().await {
        let message = e.sanitized_display(&config.api_key);
        tracing::error!(error = %message, kind = %e.kind(), "Connection test failed");
        tracing::warn!(
            "Server will start but may not be able to reach Freshdesk. \
             Check configuration and network connectivity."
        );
    }

    let server = server::FreshgateServer::new(client, config.grant.clone());

    tracing::info!("Server initialized, starting stdio transport");

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })
        .context("Failed to start server")?;

    tracing::info!("Server running, waiting for requests");

    service
        .waiting()
        .await
        .context("Server error during operation")?;

    tracing::info!("Server shutting down");

    Ok(())
}
