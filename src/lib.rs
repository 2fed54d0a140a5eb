//! # Freshgate
//!
//! Freshgate is an MCP (Model Context Protocol) server for the Freshdesk
//! helpdesk API (v2).
//!
//! It exposes tickets, conversations, contacts, agents and companies as MCP
//! tools. Every tool is checked against the caller's grant before anything
//! is sent, and every request goes through one orchestrator that enforces a
//! per-minute budget, retries transient failures and classifies the rest.
//!
//! ## Architecture
//!
//! Leaf first:
//!
//! - [`credentials`] - Base URL and Basic authentication header
//! - [`rate_limit`] - Per-minute request budget, merged with the remote view
//! - [`classify`] - Maps HTTP and transport failures onto [`error::ErrorKind`]
//! - [`retry`] - Retry ceiling and backoff
//! - [`client`] - The request orchestrator, [`client::FreshdeskClient`]
//! - [`access`] - The access gate deciding allow/deny per tool
//! - [`resources`] - Ticket, conversation, contact, agent and company operations
//! - [`server`] - MCP server implementation with tool routing
//! - [`config`], [`error`], [`models`], [`tools`] - Supporting types
//!
//! ## Usage
//!
//! Freshgate is primarily used as a binary. To run:
//!
//! ```bash
//! export FRESHDESK_DOMAIN=acme
//! export FRESHDESK_API_KEY=your-api-key
//! export FRESHDESK_ACCESS_LEVEL=write
//! export FRESHDESK_PERMISSIONS=tickets:read,tickets:write,conversations:read,conversations:write
//!
//! ./freshgate
//! ```
//!
//! Without `FRESHDESK_ACCESS_LEVEL` the server starts but denies every tool
//! except `ping`.
//!
//! ## Security Considerations
//!
//! The API key is stored only in memory and is:
//! - Never logged at any log level
//! - Sanitized from all error messages
//! - Not included in any tool responses
//!
//! ## Example
//!
//! Using the [`FreshdeskClient`](client::FreshdeskClient) directly:
//!
//! ```ignore
//! use freshgate::config::Config;
//! use freshgate::client::FreshdeskClient;
//! use freshgate::resources::TicketFilter;
//!
//! async fn example() -> Result<(), freshgate::error::GatewayError> {
//!     let config = Config::from_env()?;
//!     let client = FreshdeskClient::new(&config)?;
//!
//!     let filter = TicketFilter {
//!         filter: Some("new_and_my_open".to_string()),
//!         ..Default::default()
//!     };
//!     for ticket in client.list_tickets(&filter).await? {
//!         println!("#{}: {}", ticket.id, ticket.display_subject());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod access;
pub mod classify;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod rate_limit;
pub mod resources;
pub mod retry;
pub mod server;
pub mod tools;
