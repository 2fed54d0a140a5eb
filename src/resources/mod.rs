//! Resource facades.
//!
//! Each submodule adds methods to [`FreshdeskClient`](crate::client::FreshdeskClient)
//! that turn one logical operation into a verb, a path and a payload for the
//! orchestrator. Inputs are checked here first; a rejected input never
//! reaches the network.

mod agents;
mod companies;
mod contacts;
mod conversations;
mod tickets;

pub use agents::AgentFilter;
pub use contacts::ContactFilter;
pub use tickets::{TicketFilter, MAX_SUBJECT_LEN};

use crate::error::GatewayError;

/// Rejects the zero ID, which the API never assigns.
pub(crate) fn validate_id(id: u64, field_name: &str) -> Result<(), GatewayError> {
    if id == 0 {
        return Err(GatewayError::validation(format!(
            "{} must be a positive integer",
            field_name
        )));
    }
    Ok(())
}

/// Rejects empty or whitespace-only text.
pub(crate) fn require_text(value: &str, field_name: &str) -> Result<(), GatewayError> {
    if value.trim().is_empty() {
        return Err(GatewayError::validation(format!("{} is required", field_name)));
    }
    Ok(())
}

/// Minimal shape check for an email address.
pub(crate) fn validate_email(email: &str, field_name: &str) -> Result<(), GatewayError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(GatewayError::validation(format!(
            "{} is not a valid email address: {:?}",
            field_name,
            email.chars().take(50).collect::<String>()
        )));
    }
    Ok(())
}

/// Checks a value against a fixed list of accepted values.
pub(crate) fn validate_choice(
    value: &str,
    allowed: &[&str],
    field_name: &str,
) -> Result<(), GatewayError> {
    if !allowed.contains(&value) {
        return Err(GatewayError::validation(format!(
            "{} must be one of: {}",
            field_name,
            allowed.join(", ")
        )));
    }
    Ok(())
}
