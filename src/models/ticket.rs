//! Ticket models for the Freshdesk API.
//!
//! Status, priority and source are kept as raw numeric codes: helpdesks can
//! define custom statuses, so decoding them into a closed enum would reject
//! valid tickets.

use serde::{Deserialize, Serialize};

use super::{source_name, Conversation, TicketPriority, TicketStatus};

/// A support ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique ticket ID.
    pub id: u64,

    /// Subject line.
    #[serde(default)]
    pub subject: Option<String>,

    /// HTML body.
    #[serde(default)]
    pub description: Option<String>,

    /// Plain-text body.
    #[serde(default)]
    pub description_text: Option<String>,

    /// Status code (2 open, 3 pending, 4 resolved, 5 closed, others custom).
    #[serde(default)]
    pub status: Option<u8>,

    /// Priority code (1 low to 4 urgent).
    #[serde(default)]
    pub priority: Option<u8>,

    /// Channel the ticket came from.
    #[serde(default)]
    pub source: Option<u8>,

    /// Ticket type, e.g. "Incident" or "Question".
    #[serde(default, rename = "type")]
    pub ticket_type: Option<String>,

    /// Contact who raised the ticket.
    #[serde(default)]
    pub requester_id: Option<u64>,

    /// Agent the ticket is assigned to.
    #[serde(default)]
    pub responder_id: Option<u64>,

    /// Group the ticket is assigned to.
    #[serde(default)]
    pub group_id: Option<u64>,

    /// Company of the requester.
    #[serde(default)]
    pub company_id: Option<u64>,

    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// CC addresses.
    #[serde(default)]
    pub cc_emails: Vec<String>,

    /// Whether the ticket has been escalated.
    #[serde(default)]
    pub is_escalated: Option<bool>,

    /// Resolution due time.
    #[serde(default)]
    pub due_by: Option<String>,

    /// First response due time.
    #[serde(default)]
    pub fr_due_by: Option<String>,

    /// Creation time (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update time (ISO 8601).
    #[serde(default)]
    pub updated_at: Option<String>,

    /// Helpdesk-specific custom fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<serde_json::Value>,

    /// Conversations, present only when requested with `include=conversations`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversations: Option<Vec<Conversation>>,
}

impl Ticket {
    /// Returns the subject or a placeholder.
    pub fn display_subject(&self) -> &str {
        self.subject.as_deref().unwrap_or("(No subject)")
    }

    /// Returns the status name, `Custom (n)` for helpdesk-defined codes.
    pub fn display_status(&self) -> String {
        match self.status {
            Some(code) => TicketStatus::try_from(code)
                .map(|s| s.name().to_string())
                .unwrap_or_else(|_| format!("Custom ({})", code)),
            None => "Unknown".to_string(),
        }
    }

    /// Returns the priority name.
    pub fn display_priority(&self) -> &str {
        self.priority
            .and_then(|code| TicketPriority::try_from(code).ok())
            .map(TicketPriority::name)
            .unwrap_or("Unknown")
    }

    /// Returns the source channel name.
    pub fn display_source(&self) -> &str {
        self.source.map(source_name).unwrap_or("Unknown")
    }

    /// Returns the plain-text body if present, else the HTML body.
    pub fn body(&self) -> Option<&str> {
        self.description_text
            .as_deref()
            .or(self.description.as_deref())
    }
}

/// Payload for creating a ticket.
///
/// The default is an open, low-priority ticket.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewTicket {
    /// Subject line.
    pub subject: String,

    /// HTML body.
    pub description: String,

    /// Requester email; one of `email` or `requester_id` is required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Requester contact ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<u64>,

    /// Status code.
    pub status: u8,

    /// Priority code.
    pub priority: u8,

    /// Ticket type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,

    /// Assignee agent ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder_id: Option<u64>,

    /// Assignee group ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,

    /// Tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// CC addresses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc_emails: Vec<String>,
}

impl Default for NewTicket {
    fn default() -> Self {
        Self {
            subject: String::new(),
            description: String::new(),
            email: None,
            requester_id: None,
            status: TicketStatus::Open.into(),
            priority: TicketPriority::Low.into(),
            ticket_type: None,
            responder_id: None,
            group_id: None,
            tags: Vec::new(),
            cc_emails: Vec::new(),
        }
    }
}

/// Payload for updating a ticket. Only set fields are sent.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct TicketUpdate {
    /// New subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// New HTML body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,

    /// New priority code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,

    /// New ticket type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,

    /// New assignee agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder_id: Option<u64>,

    /// New assignee group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,

    /// Replacement tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl TicketUpdate {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Envelope of the search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults<T> {
    /// Matching records on this page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,

    /// Total number of matches across all pages.
    #[serde(default)]
    pub total: u64,
}
