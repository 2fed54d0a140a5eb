//! Agent models for the Freshdesk API.
//!
//! Agents are the helpdesk staff tickets are assigned to. The API nests the
//! person's details under `contact`.

use serde::{Deserialize, Serialize};

/// Personal details of an agent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AgentContact {
    /// Full name.
    #[serde(default)]
    pub name: Option<String>,

    /// Email.
    #[serde(default)]
    pub email: Option<String>,

    /// Whether the account is active.
    #[serde(default)]
    pub active: Option<bool>,

    /// Job title.
    #[serde(default)]
    pub job_title: Option<String>,
}

/// A helpdesk agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent ID.
    pub id: u64,

    /// Whether the agent is taking new tickets.
    #[serde(default)]
    pub available: Option<bool>,

    /// Occasional (day-pass) agent.
    #[serde(default)]
    pub occasional: Option<bool>,

    /// Ticket visibility: 1 global, 2 group, 3 restricted.
    #[serde(default)]
    pub ticket_scope: Option<u8>,

    /// Agent type, e.g. "support_agent".
    #[serde(default, rename = "type")]
    pub agent_type: Option<String>,

    /// Personal details.
    #[serde(default)]
    pub contact: AgentContact,

    /// Creation time (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Agent {
    /// Returns the display name, falling back to email or ID.
    pub fn display_name(&self) -> String {
        self.contact
            .name
            .clone()
            .or_else(|| self.contact.email.clone())
            .unwrap_or_else(|| self.id.to_string())
    }

    /// Returns the email if present.
    pub fn email(&self) -> Option<&str> {
        self.contact.email.as_deref()
    }

    /// Returns the ticket scope label.
    pub fn scope(&self) -> &str {
        match self.ticket_scope {
            Some(1) => "Global",
            Some(2) => "Group",
            Some(3) => "Restricted",
            _ => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_deserialize() {
        let json = r#"{
            "id": 456,
            "available": true,
            "ticket_scope": 1,
            "type": "support_agent",
            "contact": {"name": "Jane Smith", "email": "jane@example.com", "active": true}
        }"#;
        let agent: Agent = serde_json::from_str(json).unwrap();
        assert_eq!(agent.id, 456);
        assert_eq!(agent.display_name(), "Jane Smith");
        assert_eq!(agent.email(), Some("jane@example.com"));
        assert_eq!(agent.scope(), "Global");
    }

    #[test]
    fn test_agent_display_name_fallback_to_id() {
        let agent: Agent = serde_json::from_str(r#"{"id": 9}"#).unwrap();
        assert_eq!(agent.display_name(), "9");
        assert_eq!(agent.scope(), "Unknown");
    }
}
