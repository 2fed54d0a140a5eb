//! Access requirements of every gated tool.
//!
//! Reading needs level `read`, creating and updating needs `write`, and
//! deleting needs `admin`. Each tool also names the permissions it touches.

use crate::access::{AccessLevel, Permission, Requirement};

use AccessLevel::{Admin, Read, Write};
use Permission::*;

pub(crate) const LIST_TICKETS: Requirement = Requirement::new(Read, &[TicketsRead]);
pub(crate) const GET_TICKET: Requirement = Requirement::new(Read, &[TicketsRead]);
pub(crate) const GET_TICKET_WITH_CONVERSATIONS: Requirement =
    Requirement::new(Read, &[TicketsRead, ConversationsRead]);
pub(crate) const SEARCH_TICKETS: Requirement = Requirement::new(Read, &[TicketsRead]);
pub(crate) const CREATE_TICKET: Requirement = Requirement::new(Write, &[TicketsWrite]);
pub(crate) const UPDATE_TICKET: Requirement = Requirement::new(Write, &[TicketsWrite]);
pub(crate) const DELETE_TICKET: Requirement = Requirement::new(Admin, &[TicketsDelete]);

pub(crate) const LIST_CONVERSATIONS: Requirement =
    Requirement::new(Read, &[TicketsRead, ConversationsRead]);
pub(crate) const REPLY_TO_TICKET: Requirement = Requirement::new(Write, &[ConversationsWrite]);
pub(crate) const ADD_NOTE: Requirement = Requirement::new(Write, &[ConversationsWrite]);

pub(crate) const LIST_CONTACTS: Requirement = Requirement::new(Read, &[ContactsRead]);
pub(crate) const GET_CONTACT: Requirement = Requirement::new(Read, &[ContactsRead]);
pub(crate) const CREATE_CONTACT: Requirement = Requirement::new(Write, &[ContactsWrite]);
pub(crate) const UPDATE_CONTACT: Requirement = Requirement::new(Write, &[ContactsWrite]);
pub(crate) const DELETE_CONTACT: Requirement = Requirement::new(Admin, &[ContactsDelete]);

pub(crate) const LIST_AGENTS: Requirement = Requirement::new(Read, &[AgentsRead]);
pub(crate) const GET_AGENT: Requirement = Requirement::new(Read, &[AgentsRead]);
pub(crate) const GET_CURRENT_AGENT: Requirement = Requirement::new(Read, &[AgentsRead]);

pub(crate) const LIST_COMPANIES: Requirement = Requirement::new(Read, &[CompaniesRead]);
pub(crate) const GET_COMPANY: Requirement = Requirement::new(Read, &[CompaniesRead]);
pub(crate) const CREATE_COMPANY: Requirement = Requirement::new(Write, &[CompaniesWrite]);
pub(crate) const UPDATE_COMPANY: Requirement = Requirement::new(Write, &[CompaniesWrite]);

pub(crate) const RATE_LIMIT_STATUS: Requirement = Requirement::new(Read, &[]);

/// Every gated tool and its requirement.
pub const TOOL_REQUIREMENTS: &[(&str, Requirement)] = &[
    ("list_tickets", LIST_TICKETS),
    ("get_ticket", GET_TICKET),
    ("search_tickets", SEARCH_TICKETS),
    ("create_ticket", CREATE_TICKET),
    ("update_ticket", UPDATE_TICKET),
    ("delete_ticket", DELETE_TICKET),
    ("list_conversations", LIST_CONVERSATIONS),
    ("reply_to_ticket", REPLY_TO_TICKET),
    ("add_note", ADD_NOTE),
    ("list_contacts", LIST_CONTACTS),
    ("get_contact", GET_CONTACT),
    ("create_contact", CREATE_CONTACT),
    ("update_contact", UPDATE_CONTACT),
    ("delete_contact", DELETE_CONTACT),
    ("list_agents", LIST_AGENTS),
    ("get_agent", GET_AGENT),
    ("get_current_agent", GET_CURRENT_AGENT),
    ("list_companies", LIST_COMPANIES),
    ("get_company", GET_COMPANY),
    ("create_company", CREATE_COMPANY),
    ("update_company", UPDATE_COMPANY),
    ("rate_limit_status", RATE_LIMIT_STATUS),
];

/// Looks up the requirement of a gated tool.
pub fn requirement_for(tool: &str) -> Option<Requirement> {
    TOOL_REQUIREMENTS
        .iter()
        .find(|(name, _)| *name == tool)
        .map(|(_, requirement)| *requirement)
}
