//! Tool input parameter structs for MCP tools.
//!
//! This module defines the input types for each MCP tool, with
//! JSON Schema derivation for MCP tool discovery.
//!
//! # Input Sanitization
//!
//! All input structs implement `sanitize()` which trims whitespace from
//! string fields and turns empty strings into `None`. This should be called
//! before processing input. Conversions into request payloads (`to_*`)
//! assume sanitized input.

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;

use crate::error::GatewayError;
use crate::models::{
    CompanyFields, ContactFields, NewNote, NewReply, NewTicket, Page, TicketPriority,
    TicketStatus, TicketUpdate,
};
use crate::resources::{AgentFilter, ContactFilter, TicketFilter};

/// Helper function to trim an optional string.
fn trim_option(s: &Option<String>) -> Option<String> {
    s.as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Trims every entry of an optional list and drops the empty ones.
fn trim_list(list: &Option<Vec<String>>) -> Option<Vec<String>> {
    list.as_ref().map(|items| {
        items
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
}

/// Accepts a status name (`open`, `pending`, `resolved`, `closed`) or any
/// numeric code, so custom statuses can be set.
fn parse_status(value: &str) -> Result<u8, GatewayError> {
    if let Some(status) = TicketStatus::parse(value) {
        return Ok(status.into());
    }
    value.parse::<u8>().map_err(|_| {
        GatewayError::validation(format!(
            "unknown status {:?}; use open, pending, resolved, closed or a numeric code",
            value
        ))
    })
}

fn parse_priority(value: &str) -> Result<u8, GatewayError> {
    TicketPriority::parse(value).map(Into::into).ok_or_else(|| {
        GatewayError::validation(format!(
            "unknown priority {:?}; use low, medium, high or urgent",
            value
        ))
    })
}

// ============================================================================
// Tickets
// ============================================================================

/// Input parameters for the list_tickets tool.
///
/// All fields are optional - use them to filter the results.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListTicketsInput {
    /// Predefined view: 'new_and_my_open', 'watching', 'spam' or 'deleted'.
    #[serde(default)]
    pub filter: Option<String>,

    /// Only tickets raised by this contact ID.
    #[serde(default)]
    pub requester_id: Option<u64>,

    /// Only tickets of this company ID.
    #[serde(default)]
    pub company_id: Option<u64>,

    /// Only tickets updated since this time (ISO 8601, e.g. 2026-10-01T00:00:00Z).
    #[serde(default)]
    pub updated_since: Option<String>,

    /// Sort field: 'created_at', 'due_by', 'updated_at' or 'status'.
    #[serde(default)]
    pub order_by: Option<String>,

    /// Sort direction: 'asc' or 'desc'.
    #[serde(default)]
    pub order_type: Option<String>,

    /// Page number, starting at 1.
    #[serde(default)]
    pub page: Option<u32>,

    /// Tickets per page (default: 30, max: 100).
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl ListTicketsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            filter: trim_option(&self.filter),
            updated_since: trim_option(&self.updated_since),
            order_by: trim_option(&self.order_by),
            order_type: trim_option(&self.order_type),
            ..self
        }
    }

    /// Builds the list filter.
    pub fn to_filter(&self) -> TicketFilter {
        TicketFilter {
            filter: self.filter.clone(),
            requester_id: self.requester_id,
            company_id: self.company_id,
            updated_since: self.updated_since.clone(),
            order_by: self.order_by.clone(),
            order_type: self.order_type.clone(),
            page: Page::new(self.page, self.per_page),
        }
    }
}

/// Input parameters for the get_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTicketInput {
    /// The ID of the ticket to retrieve.
    pub ticket_id: u64,

    /// If true, include the ticket's replies and notes. Default: false.
    #[serde(default)]
    pub include_conversations: Option<bool>,
}

/// Input parameters for the search_tickets tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchTicketsInput {
    /// Query in the helpdesk search language, e.g. "priority:4 AND status:2"
    /// or "tag:'vpn'". Use single quotes for string values.
    pub query: String,

    /// Result page, 1 to 10 (30 results per page).
    #[serde(default)]
    pub page: Option<u32>,
}

impl SearchTicketsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            query: self.query.trim().to_string(),
            page: self.page,
        }
    }
}

/// Input parameters for the create_ticket tool.
///
/// Subject and one of email or requester_id are required.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTicketInput {
    /// Ticket subject (required, max 255 characters).
    pub subject: String,

    /// Detailed description of the issue (supports HTML).
    #[serde(default)]
    pub description: Option<String>,

    /// Email of the requester. Creates the contact if it does not exist.
    #[serde(default)]
    pub email: Option<String>,

    /// ID of an existing contact to raise the ticket for.
    #[serde(default)]
    pub requester_id: Option<u64>,

    /// Status: 'open' (default), 'pending', 'resolved', 'closed' or a numeric code.
    #[serde(default)]
    pub status: Option<String>,

    /// Priority: 'low' (default), 'medium', 'high' or 'urgent'.
    #[serde(default)]
    pub priority: Option<String>,

    /// Ticket type, e.g. 'Incident', 'Question', 'Problem'.
    #[serde(rename = "type", default)]
    pub ticket_type: Option<String>,

    /// Agent ID to assign (use list_agents to find IDs).
    #[serde(default)]
    pub responder_id: Option<u64>,

    /// Group ID to assign.
    #[serde(default)]
    pub group_id: Option<u64>,

    /// Tags to attach.
    #[serde(default)]
    pub tags: Option<Vec<String>>,

    /// Addresses to CC.
    #[serde(default)]
    pub cc_emails: Option<Vec<String>>,
}

impl CreateTicketInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            subject: self.subject.trim().to_string(),
            description: trim_option(&self.description),
            email: trim_option(&self.email),
            status: trim_option(&self.status),
            priority: trim_option(&self.priority),
            ticket_type: trim_option(&self.ticket_type),
            tags: trim_list(&self.tags),
            cc_emails: trim_list(&self.cc_emails),
            ..self
        }
    }

    /// Builds the creation payload, applying the open/low defaults.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Validation` for an unknown status or priority.
    pub fn to_new_ticket(&self) -> Result<NewTicket, GatewayError> {
        let defaults = NewTicket::default();
        Ok(NewTicket {
            subject: self.subject.clone(),
            description: self.description.clone().unwrap_or_default(),
            email: self.email.clone(),
            requester_id: self.requester_id,
            status: match &self.status {
                Some(s) => parse_status(s)?,
                None => defaults.status,
            },
            priority: match &self.priority {
                Some(p) => parse_priority(p)?,
                None => defaults.priority,
            },
            ticket_type: self.ticket_type.clone(),
            responder_id: self.responder_id,
            group_id: self.group_id,
            tags: self.tags.clone().unwrap_or_default(),
            cc_emails: self.cc_emails.clone().unwrap_or_default(),
        })
    }
}

/// Input parameters for the update_ticket tool.
///
/// Ticket ID is required. At least one other field must be provided.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTicketInput {
    /// The ID of the ticket to update.
    pub ticket_id: u64,

    /// New subject (max 255 characters).
    #[serde(default)]
    pub subject: Option<String>,

    /// New description (supports HTML).
    #[serde(default)]
    pub description: Option<String>,

    /// New status: 'open', 'pending', 'resolved', 'closed' or a numeric code.
    #[serde(default)]
    pub status: Option<String>,

    /// New priority: 'low', 'medium', 'high' or 'urgent'.
    #[serde(default)]
    pub priority: Option<String>,

    /// New ticket type.
    #[serde(rename = "type", default)]
    pub ticket_type: Option<String>,

    /// Agent ID to reassign to.
    #[serde(default)]
    pub responder_id: Option<u64>,

    /// Group ID to reassign to.
    #[serde(default)]
    pub group_id: Option<u64>,

    /// Replacement tag list.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl UpdateTicketInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            subject: trim_option(&self.subject),
            description: trim_option(&self.description),
            status: trim_option(&self.status),
            priority: trim_option(&self.priority),
            ticket_type: trim_option(&self.ticket_type),
            tags: trim_list(&self.tags),
            ..self
        }
    }

    /// Builds the update payload.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Validation` for an unknown status or priority.
    pub fn to_update(&self) -> Result<TicketUpdate, GatewayError> {
        Ok(TicketUpdate {
            subject: self.subject.clone(),
            description: self.description.clone(),
            status: self.status.as_deref().map(parse_status).transpose()?,
            priority: self.priority.as_deref().map(parse_priority).transpose()?,
            ticket_type: self.ticket_type.clone(),
            responder_id: self.responder_id,
            group_id: self.group_id,
            tags: self.tags.clone(),
        })
    }
}

/// Input parameters for the delete_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteTicketInput {
    /// The ID of the ticket to delete.
    pub ticket_id: u64,
}

// ============================================================================
// Conversations
// ============================================================================

/// Input parameters for the list_conversations tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListConversationsInput {
    /// The ID of the ticket.
    pub ticket_id: u64,

    /// Page number, starting at 1.
    #[serde(default)]
    pub page: Option<u32>,

    /// Entries per page (default: 30, max: 100).
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// Input parameters for the reply_to_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReplyToTicketInput {
    /// The ID of the ticket to reply to.
    pub ticket_id: u64,

    /// Reply content (supports HTML). Sent to the requester.
    pub body: String,

    /// Additional addresses to CC.
    #[serde(default)]
    pub cc_emails: Option<Vec<String>>,
}

impl ReplyToTicketInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            body: self.body.trim().to_string(),
            cc_emails: trim_list(&self.cc_emails),
            ..self
        }
    }

    /// Builds the reply payload.
    pub fn to_reply(&self) -> NewReply {
        NewReply {
            body: self.body.clone(),
            cc_emails: self.cc_emails.clone().unwrap_or_default(),
        }
    }
}

/// Input parameters for the add_note tool.
///
/// Ticket ID and body are required.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddNoteInput {
    /// The ID of the ticket to add a note to.
    pub ticket_id: u64,

    /// The note content (supports HTML formatting).
    pub body: String,

    /// If false, the requester can see the note. Default: true (agents only).
    #[serde(default)]
    pub private: Option<bool>,

    /// Agent addresses to notify about the note.
    #[serde(default)]
    pub notify_emails: Option<Vec<String>>,
}

impl AddNoteInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            body: self.body.trim().to_string(),
            notify_emails: trim_list(&self.notify_emails),
            ..self
        }
    }

    /// Builds the note payload. Notes are private unless stated otherwise.
    pub fn to_note(&self) -> NewNote {
        NewNote {
            body: self.body.clone(),
            private: self.private.unwrap_or(true),
            notify_emails: self.notify_emails.clone().unwrap_or_default(),
        }
    }
}

// ============================================================================
// Contacts
// ============================================================================

/// Input parameters for the list_contacts tool.
///
/// All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListContactsInput {
    /// Exact email match.
    #[serde(default)]
    pub email: Option<String>,

    /// Exact phone match.
    #[serde(default)]
    pub phone: Option<String>,

    /// Exact mobile match.
    #[serde(default)]
    pub mobile: Option<String>,

    /// Only contacts of this company ID.
    #[serde(default)]
    pub company_id: Option<u64>,

    /// 'verified', 'unverified', 'blocked' or 'deleted'.
    #[serde(default)]
    pub state: Option<String>,

    /// Page number, starting at 1.
    #[serde(default)]
    pub page: Option<u32>,

    /// Contacts per page (default: 30, max: 100).
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl ListContactsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            email: trim_option(&self.email),
            phone: trim_option(&self.phone),
            mobile: trim_option(&self.mobile),
            state: trim_option(&self.state),
            ..self
        }
    }

    /// Builds the list filter.
    pub fn to_filter(&self) -> ContactFilter {
        ContactFilter {
            email: self.email.clone(),
            phone: self.phone.clone(),
            mobile: self.mobile.clone(),
            company_id: self.company_id,
            state: self.state.clone(),
            page: Page::new(self.page, self.per_page),
        }
    }
}

/// Input parameters for the get_contact and delete_contact tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ContactIdInput {
    /// The ID of the contact.
    pub contact_id: u64,
}

/// Input parameters for the create_contact tool.
///
/// Name and at least one of email, phone or mobile are required.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateContactInput {
    /// Full name.
    pub name: String,

    /// Primary email.
    #[serde(default)]
    pub email: Option<String>,

    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// Mobile number.
    #[serde(default)]
    pub mobile: Option<String>,

    /// Company ID to associate.
    #[serde(default)]
    pub company_id: Option<u64>,

    /// Job title.
    #[serde(default)]
    pub job_title: Option<String>,
}

impl CreateContactInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: trim_option(&self.email),
            phone: trim_option(&self.phone),
            mobile: trim_option(&self.mobile),
            job_title: trim_option(&self.job_title),
            ..self
        }
    }

    /// Builds the creation payload.
    pub fn to_fields(&self) -> ContactFields {
        ContactFields {
            name: Some(self.name.clone()),
            email: self.email.clone(),
            phone: self.phone.clone(),
            mobile: self.mobile.clone(),
            company_id: self.company_id,
            job_title: self.job_title.clone(),
        }
    }
}

/// Input parameters for the update_contact tool.
///
/// Contact ID is required. At least one other field must be provided.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateContactInput {
    /// The ID of the contact to update.
    pub contact_id: u64,

    /// New name.
    #[serde(default)]
    pub name: Option<String>,

    /// New email.
    #[serde(default)]
    pub email: Option<String>,

    /// New phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// New mobile number.
    #[serde(default)]
    pub mobile: Option<String>,

    /// New company ID.
    #[serde(default)]
    pub company_id: Option<u64>,

    /// New job title.
    #[serde(default)]
    pub job_title: Option<String>,
}

impl UpdateContactInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: trim_option(&self.name),
            email: trim_option(&self.email),
            phone: trim_option(&self.phone),
            mobile: trim_option(&self.mobile),
            job_title: trim_option(&self.job_title),
            ..self
        }
    }

    /// Builds the update payload.
    pub fn to_fields(&self) -> ContactFields {
        ContactFields {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            mobile: self.mobile.clone(),
            company_id: self.company_id,
            job_title: self.job_title.clone(),
        }
    }
}

// ============================================================================
// Agents
// ============================================================================

/// Input parameters for the list_agents tool.
///
/// All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListAgentsInput {
    /// Exact email match.
    #[serde(default)]
    pub email: Option<String>,

    /// 'fulltime' or 'occasional'.
    #[serde(default)]
    pub state: Option<String>,

    /// Page number, starting at 1.
    #[serde(default)]
    pub page: Option<u32>,

    /// Agents per page (default: 30, max: 100).
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl ListAgentsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            email: trim_option(&self.email),
            state: trim_option(&self.state),
            ..self
        }
    }

    /// Builds the list filter.
    pub fn to_filter(&self) -> AgentFilter {
        AgentFilter {
            email: self.email.clone(),
            state: self.state.clone(),
            page: Page::new(self.page, self.per_page),
        }
    }
}

/// Input parameters for the get_agent tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AgentIdInput {
    /// The ID of the agent.
    pub agent_id: u64,
}

// ============================================================================
// Companies
// ============================================================================

/// Pagination-only input, used by list_companies.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PageInput {
    /// Page number, starting at 1.
    #[serde(default)]
    pub page: Option<u32>,

    /// Entries per page (default: 30, max: 100).
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl PageInput {
    /// Builds the page request.
    pub fn to_page(&self) -> Page {
        Page::new(self.page, self.per_page)
    }
}

/// Input parameters for the get_company tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompanyIdInput {
    /// The ID of the company.
    pub company_id: u64,
}

/// Input parameters for the create_company tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateCompanyInput {
    /// Company name (required, must be unique).
    pub name: String,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// Email domains, e.g. ["acme.com"]. Contacts with these domains join the company.
    #[serde(default)]
    pub domains: Option<Vec<String>>,

    /// Internal note.
    #[serde(default)]
    pub note: Option<String>,
}

impl CreateCompanyInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: trim_option(&self.description),
            domains: trim_list(&self.domains),
            note: trim_option(&self.note),
        }
    }

    /// Builds the creation payload.
    pub fn to_fields(&self) -> CompanyFields {
        CompanyFields {
            name: Some(self.name.clone()),
            description: self.description.clone(),
            domains: self.domains.clone(),
            note: self.note.clone(),
        }
    }
}

/// Input parameters for the update_company tool.
///
/// Company ID is required. At least one other field must be provided.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateCompanyInput {
    /// The ID of the company to update.
    pub company_id: u64,

    /// New name.
    #[serde(default)]
    pub name: Option<String>,

    /// New description.
    #[serde(default)]
    pub description: Option<String>,

    /// Replacement domain list.
    #[serde(default)]
    pub domains: Option<Vec<String>>,

    /// New internal note.
    #[serde(default)]
    pub note: Option<String>,
}

impl UpdateCompanyInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: trim_option(&self.name),
            description: trim_option(&self.description),
            domains: trim_list(&self.domains),
            note: trim_option(&self.note),
            ..self
        }
    }

    /// Builds the update payload.
    pub fn to_fields(&self) -> CompanyFields {
        CompanyFields {
            name: self.name.clone(),
            description: self.description.clone(),
            domains: self.domains.clone(),
            note: self.note.clone(),
        }
    }
}
