//! Response formatting helpers.
//!
//! Tools answer with plain text meant to be read by the calling agent.

use crate::models::{Agent, Company, Contact, Conversation, SearchResults, Ticket};
use crate::rate_limit::QuotaInfo;

/// Maximum length for description fields before truncation.
const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Maximum length for conversation bodies in listings.
const MAX_CONVERSATION_LENGTH: usize = 1000;

const TRUNCATION_MARKER: &str = "... [truncated]";

/// Truncates a string if it exceeds the maximum length.
///
/// If truncated, appends "... [truncated]" to indicate the content was cut.
pub(crate) fn truncate_text(text: &str, max_length: usize) -> String {
    if text.len() <= max_length {
        return text.to_string();
    }

    let mut end = max_length.saturating_sub(TRUNCATION_MARKER.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    // Prefer a word boundary
    if let Some(space_pos) = text[..end].rfind(char::is_whitespace) {
        end = space_pos;
    }
    format!("{}{}", &text[..end], TRUNCATION_MARKER)
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn id_or_dash(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

// ============================================================================
// Tickets
// ============================================================================

fn push_ticket_line(output: &mut String, ticket: &Ticket) {
    output.push_str(&format!("#{} - {}\n", ticket.id, ticket.display_subject()));
    output.push_str(&format!(
        "   Status: {} | Priority: {} | Agent: {}\n",
        ticket.display_status(),
        ticket.display_priority(),
        id_or_dash(ticket.responder_id)
    ));
    output.push_str(&format!(
        "   Requester: {} | Updated: {}\n\n",
        id_or_dash(ticket.requester_id),
        or_dash(ticket.updated_at.as_deref())
    ));
}

/// Formats a list of tickets.
pub(crate) fn format_ticket_list(tickets: &[Ticket]) -> String {
    if tickets.is_empty() {
        return "No tickets found matching the criteria.".to_string();
    }

    let mut output = format!("Found {} ticket(s):\n\n", tickets.len());
    for ticket in tickets {
        push_ticket_line(&mut output, ticket);
    }
    output
}

/// Formats search results with the total match count.
pub(crate) fn format_search_results(results: &SearchResults<Ticket>, page: u32) -> String {
    if results.results.is_empty() {
        return "No tickets matched the query.".to_string();
    }

    let mut output = format!(
        "{} ticket(s) matched; showing {} from page {}:\n\n",
        results.total,
        results.results.len(),
        page
    );
    for ticket in &results.results {
        push_ticket_line(&mut output, ticket);
    }
    output
}

/// Formats full ticket details, including conversations when present.
pub(crate) fn format_ticket_details(ticket: &Ticket) -> String {
    let mut output = String::new();

    output.push_str(&format!("Ticket #{}: {}\n", ticket.id, ticket.display_subject()));
    output.push_str(&"=".repeat(60));
    output.push('\n');

    output.push_str(&format!("Status:    {}\n", ticket.display_status()));
    output.push_str(&format!("Priority:  {}\n", ticket.display_priority()));
    output.push_str(&format!("Source:    {}\n", ticket.display_source()));
    if let Some(kind) = &ticket.ticket_type {
        output.push_str(&format!("Type:      {}\n", kind));
    }
    output.push_str(&format!("Requester: {}\n", id_or_dash(ticket.requester_id)));
    output.push_str(&format!("Agent:     {}\n", id_or_dash(ticket.responder_id)));
    output.push_str(&format!("Group:     {}\n", id_or_dash(ticket.group_id)));
    if let Some(company) = ticket.company_id {
        output.push_str(&format!("Company:   {}\n", company));
    }
    if !ticket.tags.is_empty() {
        output.push_str(&format!("Tags:      {}\n", ticket.tags.join(", ")));
    }
    if ticket.is_escalated == Some(true) {
        output.push_str("Escalated: yes\n");
    }
    output.push_str(&format!("Created:   {}\n", or_dash(ticket.created_at.as_deref())));
    output.push_str(&format!("Updated:   {}\n", or_dash(ticket.updated_at.as_deref())));
    if let Some(due) = &ticket.due_by {
        output.push_str(&format!("Due by:    {}\n", due));
    }

    output.push_str("\nDescription:\n");
    match ticket.body() {
        Some(body) if !body.trim().is_empty() => {
            output.push_str(&truncate_text(body.trim(), MAX_DESCRIPTION_LENGTH));
            output.push('\n');
        }
        _ => output.push_str("(No description)\n"),
    }

    if let Some(conversations) = &ticket.conversations {
        output.push('\n');
        output.push_str(&format_conversation_list(ticket.id, conversations));
    }

    output
}

/// Formats the confirmation for a created ticket.
pub(crate) fn format_create_result(ticket: &Ticket) -> String {
    format!(
        "Created ticket #{}: {}\nStatus: {} | Priority: {}\n",
        ticket.id,
        ticket.display_subject(),
        ticket.display_status(),
        ticket.display_priority()
    )
}

/// Formats the confirmation for an updated ticket.
pub(crate) fn format_update_result(ticket: &Ticket) -> String {
    format!(
        "Updated ticket #{}: {}\nStatus: {} | Priority: {} | Agent: {}\n",
        ticket.id,
        ticket.display_subject(),
        ticket.display_status(),
        ticket.display_priority(),
        id_or_dash(ticket.responder_id)
    )
}

// ============================================================================
// Conversations
// ============================================================================

/// Formats a ticket's conversations.
pub(crate) fn format_conversation_list(ticket_id: u64, conversations: &[Conversation]) -> String {
    if conversations.is_empty() {
        return format!("Ticket #{} has no conversations.", ticket_id);
    }

    let mut output = format!(
        "Ticket #{} has {} conversation(s):\n\n",
        ticket_id,
        conversations.len()
    );
    for conv in conversations {
        output.push_str(&format!(
            "[{}] {} - {} by {}\n",
            or_dash(conv.created_at.as_deref()),
            conv.direction(),
            conv.visibility(),
            id_or_dash(conv.user_id)
        ));
        output.push_str(&truncate_text(
            conv.display_content().trim(),
            MAX_CONVERSATION_LENGTH,
        ));
        output.push_str("\n\n");
    }
    output
}

/// Formats the confirmation for a reply or note.
pub(crate) fn format_conversation_result(action: &str, ticket_id: u64, conv: &Conversation) -> String {
    format!(
        "{} added to ticket #{} (conversation ID {}, {}).\n",
        action,
        ticket_id,
        conv.id,
        conv.visibility().to_lowercase()
    )
}

// ============================================================================
// Contacts
// ============================================================================

/// Formats a list of contacts.
pub(crate) fn format_contact_list(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return "No contacts found matching the criteria.".to_string();
    }

    let mut output = format!("Found {} contact(s):\n\n", contacts.len());
    for contact in contacts {
        output.push_str(&format!("ID: {} - {}\n", contact.id, contact.display_name()));
        output.push_str(&format!(
            "   Email: {} | Phone: {} | Company: {}\n\n",
            or_dash(contact.email.as_deref()),
            or_dash(contact.phone.as_deref().or(contact.mobile.as_deref())),
            id_or_dash(contact.company_id)
        ));
    }
    output
}

/// Formats one contact.
pub(crate) fn format_contact_details(contact: &Contact) -> String {
    let mut output = format!("Contact #{}: {}\n", contact.id, contact.display_name());
    output.push_str(&format!("Email:     {}\n", or_dash(contact.email.as_deref())));
    output.push_str(&format!("Phone:     {}\n", or_dash(contact.phone.as_deref())));
    output.push_str(&format!("Mobile:    {}\n", or_dash(contact.mobile.as_deref())));
    output.push_str(&format!("Job title: {}\n", or_dash(contact.job_title.as_deref())));
    output.push_str(&format!("Company:   {}\n", id_or_dash(contact.company_id)));
    output.push_str(&format!(
        "Verified:  {}\n",
        if contact.active == Some(true) { "yes" } else { "no" }
    ));
    output
}

// ============================================================================
// Agents
// ============================================================================

/// Formats a list of agents.
pub(crate) fn format_agent_list(agents: &[Agent]) -> String {
    if agents.is_empty() {
        return "No agents found.".to_string();
    }

    let mut output = format!("Found {} agent(s):\n\n", agents.len());
    for agent in agents {
        output.push_str(&format!("ID: {} - {}", agent.id, agent.display_name()));
        if let Some(email) = agent.email() {
            output.push_str(&format!(" ({})", email));
        }
        if agent.available == Some(true) {
            output.push_str(" [available]");
        }
        output.push('\n');
    }
    output.push_str("\nUse the ID as responder_id when assigning tickets.");
    output
}

/// Formats one agent.
pub(crate) fn format_agent_details(agent: &Agent) -> String {
    let mut output = format!("Agent #{}: {}\n", agent.id, agent.display_name());
    output.push_str(&format!("Email:     {}\n", or_dash(agent.email())));
    output.push_str(&format!("Job title: {}\n", or_dash(agent.contact.job_title.as_deref())));
    output.push_str(&format!("Scope:     {}\n", agent.scope()));
    output.push_str(&format!(
        "Available: {}\n",
        if agent.available == Some(true) { "yes" } else { "no" }
    ));
    if agent.occasional == Some(true) {
        output.push_str("Occasional agent\n");
    }
    output
}

// ============================================================================
// Companies
// ============================================================================

/// Formats a list of companies.
pub(crate) fn format_company_list(companies: &[Company]) -> String {
    if companies.is_empty() {
        return "No companies found.".to_string();
    }

    let mut output = format!("Found {} company(ies):\n\n", companies.len());
    for company in companies {
        output.push_str(&format!("ID: {} - {}", company.id, company.display_name()));
        if !company.domains.is_empty() {
            output.push_str(&format!(" [{}]", company.domains.join(", ")));
        }
        output.push('\n');
    }
    output
}

/// Formats one company.
pub(crate) fn format_company_details(company: &Company) -> String {
    let mut output = format!("Company #{}: {}\n", company.id, company.display_name());
    if !company.domains.is_empty() {
        output.push_str(&format!("Domains:      {}\n", company.domains.join(", ")));
    }
    if let Some(tier) = &company.account_tier {
        output.push_str(&format!("Account tier: {}\n", tier));
    }
    if let Some(health) = &company.health_score {
        output.push_str(&format!("Health score: {}\n", health));
    }
    if let Some(description) = &company.description {
        output.push_str(&format!(
            "\n{}\n",
            truncate_text(description.trim(), MAX_DESCRIPTION_LENGTH)
        ));
    }
    if let Some(note) = &company.note {
        output.push_str(&format!("\nNote: {}\n", note));
    }
    output
}

// ============================================================================
// Quota
// ============================================================================

/// Formats the request budget.
pub(crate) fn format_rate_limit(info: &QuotaInfo) -> String {
    format!(
        "Request budget: {} of {} remaining this window.\nWindow resets in {}s.",
        info.remaining,
        info.limit,
        info.resets_in().as_secs()
    )
}
