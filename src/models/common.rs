//! Common types shared across Freshdesk API models.
//!
//! This module defines pagination parameters, the API error body, and the
//! numeric status/priority/source codes used by tickets.

use serde::Deserialize;

use crate::error::GatewayError;

/// Largest page size the API accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Page size used when none is given.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Pagination parameters for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Page {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Items per page (1 to 100).
    pub per_page: Option<u32>,
}

impl Page {
    /// Creates a page request.
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self { page, per_page }
    }

    /// Checks the explicit values against the accepted ranges.
    pub fn validate(self) -> Result<(), GatewayError> {
        if self.page == Some(0) {
            return Err(GatewayError::validation("page must be 1 or greater"));
        }
        if let Some(per_page) = self.per_page {
            if !(1..=MAX_PER_PAGE).contains(&per_page) {
                return Err(GatewayError::validation(format!(
                    "per_page must be between 1 and {}, got {}",
                    MAX_PER_PAGE, per_page
                )));
            }
        }
        Ok(())
    }

    /// Converts to query parameters, filling in defaults. Call [`Page::validate`] first.
    pub fn to_query(self) -> Vec<(String, String)> {
        let page = self.page.unwrap_or(1);
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);
        vec![
            ("page".to_string(), page.to_string()),
            ("per_page".to_string(), per_page.to_string()),
        ]
    }
}

/// A single field-level complaint in an error response.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldError {
    /// The offending field.
    #[serde(default)]
    pub field: Option<String>,

    /// What is wrong with it.
    #[serde(default)]
    pub message: Option<String>,

    /// Machine-readable code, e.g. `invalid_value`.
    #[serde(default)]
    pub code: Option<String>,
}

/// Error body returned by the API on 4xx responses.
///
/// Validation failures carry a `description` and a list of field errors;
/// authentication failures carry a `code` and a `message`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// Summary, e.g. "Validation failed".
    #[serde(default)]
    pub description: Option<String>,

    /// Single message used by non-validation errors.
    #[serde(default)]
    pub message: Option<String>,

    /// Error code used by non-validation errors.
    #[serde(default)]
    pub code: Option<String>,

    /// Per-field errors.
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl ErrorResponse {
    /// Condenses the body into one line, e.g.
    /// `Validation failed: email: It should be a valid email address`.
    ///
    /// Returns `None` if the body carries nothing readable.
    pub fn summary(&self) -> Option<String> {
        let head = self
            .description
            .as_deref()
            .or(self.message.as_deref())
            .or(self.code.as_deref())
            .map(str::to_string);

        let details: Vec<String> = self
            .errors
            .iter()
            .filter_map(|e| {
                let message = e.message.as_deref().or(e.code.as_deref())?;
                Some(match e.field.as_deref() {
                    Some(field) if !field.is_empty() => format!("{}: {}", field, message),
                    _ => message.to_string(),
                })
            })
            .collect();

        match (head, details.is_empty()) {
            (Some(head), true) => Some(head),
            (Some(head), false) => Some(format!("{}: {}", head, details.join("; "))),
            (None, false) => Some(details.join("; ")),
            (None, true) => None,
        }
    }
}

/// Ticket status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    /// 2
    Open,
    /// 3
    Pending,
    /// 4
    Resolved,
    /// 5
    Closed,
}

impl TicketStatus {
    /// Parses a status name (case-insensitive) or numeric code.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" | "2" => Some(Self::Open),
            "pending" | "3" => Some(Self::Pending),
            "resolved" | "4" => Some(Self::Resolved),
            "closed" | "5" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Pending => "Pending",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }
}

impl From<TicketStatus> for u8 {
    fn from(status: TicketStatus) -> Self {
        match status {
            TicketStatus::Open => 2,
            TicketStatus::Pending => 3,
            TicketStatus::Resolved => 4,
            TicketStatus::Closed => 5,
        }
    }
}

impl TryFrom<u8> for TicketStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            2 => Ok(Self::Open),
            3 => Ok(Self::Pending),
            4 => Ok(Self::Resolved),
            5 => Ok(Self::Closed),
            other => Err(format!("unknown ticket status {}", other)),
        }
    }
}

/// Ticket priority codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketPriority {
    /// 1
    Low,
    /// 2
    Medium,
    /// 3
    High,
    /// 4
    Urgent,
}

impl TicketPriority {
    /// Parses a priority name (case-insensitive) or numeric code.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" | "1" => Some(Self::Low),
            "medium" | "2" => Some(Self::Medium),
            "high" | "3" => Some(Self::High),
            "urgent" | "4" => Some(Self::Urgent),
            _ => None,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }
}

impl From<TicketPriority> for u8 {
    fn from(priority: TicketPriority) -> Self {
        match priority {
            TicketPriority::Low => 1,
            TicketPriority::Medium => 2,
            TicketPriority::High => 3,
            TicketPriority::Urgent => 4,
        }
    }
}

impl TryFrom<u8> for TicketPriority {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            4 => Ok(Self::Urgent),
            other => Err(format!("unknown ticket priority {}", other)),
        }
    }
}

/// Display name for a ticket source code.
pub fn source_name(code: u8) -> &'static str {
    match code {
        1 => "Email",
        2 => "Portal",
        3 => "Phone",
        7 => "Chat",
        9 => "Feedback Widget",
        10 => "Outbound Email",
        _ => "Other",
    }
}
