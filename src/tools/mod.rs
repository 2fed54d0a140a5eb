//! MCP tool support for Freshgate.
//!
//! This module contains the input types, the per-tool access requirements,
//! and the text formatting used by the tools in [`crate::server`].

pub(crate) mod format;
mod inputs;
pub mod requirements;

pub use inputs::*;
pub use requirements::{requirement_for, TOOL_REQUIREMENTS};
