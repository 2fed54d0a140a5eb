//! Ticket operations.

use crate::client::FreshdeskClient;
use crate::error::GatewayError;
use crate::models::{NewTicket, Page, SearchResults, Ticket, TicketPriority, TicketUpdate};

use super::{require_text, validate_choice, validate_email, validate_id};

/// Longest subject the API accepts.
pub const MAX_SUBJECT_LEN: usize = 255;

/// Longest search query the API accepts.
const MAX_QUERY_LEN: usize = 512;

/// Search pagination stops at page 10.
const MAX_SEARCH_PAGE: u32 = 10;

const FILTERS: &[&str] = &["new_and_my_open", "watching", "spam", "deleted"];
const ORDER_FIELDS: &[&str] = &["created_at", "due_by", "updated_at", "status"];
const ORDER_TYPES: &[&str] = &["asc", "desc"];

/// Filters for listing tickets.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    /// Predefined view: `new_and_my_open`, `watching`, `spam` or `deleted`.
    pub filter: Option<String>,
    /// Only tickets raised by this contact.
    pub requester_id: Option<u64>,
    /// Only tickets of this company.
    pub company_id: Option<u64>,
    /// Only tickets updated since this ISO 8601 time.
    pub updated_since: Option<String>,
    /// Sort field.
    pub order_by: Option<String>,
    /// `asc` or `desc`.
    pub order_type: Option<String>,
    /// Pagination.
    pub page: Page,
}

impl TicketFilter {
    fn validate(&self) -> Result<(), GatewayError> {
        if let Some(filter) = &self.filter {
            validate_choice(filter, FILTERS, "filter")?;
        }
        if let Some(id) = self.requester_id {
            validate_id(id, "requester_id")?;
        }
        if let Some(id) = self.company_id {
            validate_id(id, "company_id")?;
        }
        if let Some(order_by) = &self.order_by {
            validate_choice(order_by, ORDER_FIELDS, "order_by")?;
        }
        if let Some(order_type) = &self.order_type {
            validate_choice(order_type, ORDER_TYPES, "order_type")?;
        }
        self.page.validate()
    }

    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = self.page.to_query();
        let optional = [
            ("filter", self.filter.clone()),
            ("requester_id", self.requester_id.map(|v| v.to_string())),
            ("company_id", self.company_id.map(|v| v.to_string())),
            ("updated_since", self.updated_since.clone()),
            ("order_by", self.order_by.clone()),
            ("order_type", self.order_type.clone()),
        ];
        query.extend(
            optional
                .into_iter()
                .filter_map(|(k, v)| v.map(|v| (k.to_string(), v))),
        );
        query
    }
}

fn validate_subject(subject: &str) -> Result<(), GatewayError> {
    require_text(subject, "subject")?;
    if subject.chars().count() > MAX_SUBJECT_LEN {
        return Err(GatewayError::validation(format!(
            "subject must be at most {} characters",
            MAX_SUBJECT_LEN
        )));
    }
    Ok(())
}

fn validate_priority(priority: u8) -> Result<(), GatewayError> {
    if TicketPriority::try_from(priority).is_err() {
        return Err(GatewayError::validation(
            "priority must be 1 (low), 2 (medium), 3 (high) or 4 (urgent)",
        ));
    }
    Ok(())
}

/// Codes below 2 are not statuses; anything from 2 up may be a custom status.
fn validate_status(status: u8) -> Result<(), GatewayError> {
    if status < 2 {
        return Err(GatewayError::validation(
            "status must be 2 (open), 3 (pending), 4 (resolved), 5 (closed) or a custom status code",
        ));
    }
    Ok(())
}

impl FreshdeskClient {
    /// Lists tickets matching the filter.
    ///
    /// Without a filter the API returns tickets created in the last 30 days.
    pub async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, GatewayError> {
        filter.validate()?;
        self.get("/tickets", filter.to_query()).await
    }

    /// Gets one ticket, optionally with its conversations embedded.
    pub async fn get_ticket(
        &self,
        id: u64,
        include_conversations: bool,
    ) -> Result<Ticket, GatewayError> {
        validate_id(id, "ticket_id")?;
        let query = if include_conversations {
            vec![("include".to_string(), "conversations".to_string())]
        } else {
            Vec::new()
        };
        self.get(&format!("/tickets/{}", id), query).await
    }

    /// Searches tickets with the API's query language,
    /// e.g. `priority:4 AND status:2`.
    ///
    /// The query is wrapped in double quotes as the API requires.
    pub async fn search_tickets(
        &self,
        query: &str,
        page: Option<u32>,
    ) -> Result<SearchResults<Ticket>, GatewayError> {
        let query = query.trim();
        require_text(query, "query")?;
        if query.contains('"') {
            return Err(GatewayError::validation(
                "query must not contain double quotes; use single quotes for string values",
            ));
        }
        if query.len() > MAX_QUERY_LEN {
            return Err(GatewayError::validation(format!(
                "query must be at most {} characters",
                MAX_QUERY_LEN
            )));
        }
        let page = page.unwrap_or(1);
        if !(1..=MAX_SEARCH_PAGE).contains(&page) {
            return Err(GatewayError::validation(format!(
                "page must be between 1 and {}",
                MAX_SEARCH_PAGE
            )));
        }

        let params = vec![
            ("query".to_string(), format!("\"{}\"", query)),
            ("page".to_string(), page.to_string()),
        ];
        self.get("/search/tickets", params).await
    }

    /// Creates a ticket.
    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, GatewayError> {
        validate_subject(&ticket.subject)?;
        match (&ticket.email, ticket.requester_id) {
            (None, None) => {
                return Err(GatewayError::validation(
                    "either email or requester_id is required",
                ))
            }
            (Some(email), _) => validate_email(email, "email")?,
            (None, Some(id)) => validate_id(id, "requester_id")?,
        }
        validate_status(ticket.status)?;
        validate_priority(ticket.priority)?;
        for cc in &ticket.cc_emails {
            validate_email(cc, "cc_emails")?;
        }

        self.post("/tickets", ticket).await
    }

    /// Updates the given fields of a ticket.
    pub async fn update_ticket(
        &self,
        id: u64,
        update: &TicketUpdate,
    ) -> Result<Ticket, GatewayError> {
        validate_id(id, "ticket_id")?;
        if update.is_empty() {
            return Err(GatewayError::validation(
                "at least one field must be provided to update",
            ));
        }
        if let Some(subject) = &update.subject {
            validate_subject(subject)?;
        }
        if let Some(status) = update.status {
            validate_status(status)?;
        }
        if let Some(priority) = update.priority {
            validate_priority(priority)?;
        }

        self.put(&format!("/tickets/{}", id), update).await
    }

    /// Deletes a ticket. The API moves it to trash and answers 204.
    pub async fn delete_ticket(&self, id: u64) -> Result<(), GatewayError> {
        validate_id(id, "ticket_id")?;
        self.delete(&format!("/tickets/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filter_query_includes_only_set_fields() {
        let filter = TicketFilter {
            filter: Some("new_and_my_open".to_string()),
            company_id: Some(9),
            page: Page::new(Some(2), Some(10)),
            ..Default::default()
        };
        let query = filter.to_query();
        assert_eq!(
            query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("per_page".to_string(), "10".to_string()),
                ("filter".to_string(), "new_and_my_open".to_string()),
                ("company_id".to_string(), "9".to_string()),
            ]
        );
    }

    #[test]
    fn test_filter_rejects_unknown_view() {
        let filter = TicketFilter {
            filter: Some("everything".to_string()),
            ..Default::default()
        };
        assert!(filter.validate().is_err());
    }

    #[test]
    fn test_filter_rejects_bad_order_type() {
        let filter = TicketFilter {
            order_type: Some("sideways".to_string()),
            ..Default::default()
        };
        assert!(filter.validate().is_err());
    }

    #[test]
    fn test_subject_length_limit() {
        assert!(validate_subject(&"a".repeat(255)).is_ok());
        assert!(validate_subject(&"a".repeat(256)).is_err());
        assert!(validate_subject("").is_err());
    }

    #[test]
    fn test_priority_and_status_codes() {
        assert!(validate_priority(1).is_ok());
        assert!(validate_priority(4).is_ok());
        assert!(validate_priority(0).is_err());
        assert!(validate_priority(5).is_err());

        assert!(validate_status(2).is_ok());
        assert!(validate_status(7).is_ok());
        assert!(validate_status(1).is_err());
    }
}
