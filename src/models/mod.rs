//! Data models for the Freshdesk API.
//!
//! This module contains type definitions for tickets, conversations,
//! contacts, companies, agents, and the shared pagination and error types.

mod agent;
mod common;
mod contact;
mod conversation;
mod ticket;

pub use agent::*;
pub use common::*;
pub use contact::*;
pub use conversation::*;
pub use ticket::*;
