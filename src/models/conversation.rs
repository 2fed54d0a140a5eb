//! Conversation models for the Freshdesk API.
//!
//! Conversations are the replies and notes attached to a ticket.

use serde::{Deserialize, Serialize};

/// A reply or note on a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation ID.
    pub id: u64,

    /// HTML content.
    #[serde(default)]
    pub body: Option<String>,

    /// Plain-text content.
    #[serde(default)]
    pub body_text: Option<String>,

    /// True if sent by the requester rather than an agent.
    #[serde(default)]
    pub incoming: Option<bool>,

    /// True for private notes, hidden from the requester.
    #[serde(default)]
    pub private: Option<bool>,

    /// Author (agent or contact) ID.
    #[serde(default)]
    pub user_id: Option<u64>,

    /// Ticket this belongs to.
    #[serde(default)]
    pub ticket_id: Option<u64>,

    /// Recipient addresses.
    #[serde(default)]
    pub to_emails: Vec<String>,

    /// Creation time (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Conversation {
    /// Returns the plain-text content, falling back to HTML, then a placeholder.
    pub fn display_content(&self) -> &str {
        self.body_text
            .as_deref()
            .or(self.body.as_deref())
            .unwrap_or("(No content)")
    }

    /// Returns the direction indicator.
    pub fn direction(&self) -> &str {
        match self.incoming {
            Some(true) => "Incoming",
            Some(false) => "Outgoing",
            None => "Unknown",
        }
    }

    /// Returns a visibility label.
    pub fn visibility(&self) -> &str {
        if self.private == Some(true) {
            "Private note"
        } else {
            "Public"
        }
    }
}

/// Payload for replying to a ticket.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewReply {
    /// HTML content.
    pub body: String,

    /// CC addresses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc_emails: Vec<String>,
}

/// Payload for adding a note to a ticket.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewNote {
    /// HTML content.
    pub body: String,

    /// Private notes are visible to agents only.
    pub private: bool,

    /// Agent addresses to notify.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notify_emails: Vec<String>,
}
