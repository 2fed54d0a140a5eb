//! Contact and company models for the Freshdesk API.
//!
//! Contacts are the customers who raise tickets; companies group contacts.

use serde::{Deserialize, Serialize};

/// A customer contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    /// Unique contact ID.
    pub id: u64,

    /// Full name.
    #[serde(default)]
    pub name: Option<String>,

    /// Primary email.
    #[serde(default)]
    pub email: Option<String>,

    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// Mobile number.
    #[serde(default)]
    pub mobile: Option<String>,

    /// Company the contact belongs to.
    #[serde(default)]
    pub company_id: Option<u64>,

    /// Job title.
    #[serde(default)]
    pub job_title: Option<String>,

    /// Whether the contact has verified their account.
    #[serde(default)]
    pub active: Option<bool>,

    /// Creation time (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update time (ISO 8601).
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Contact {
    /// Returns the name, falling back to email or ID.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Payload for creating or updating a contact. Only set fields are sent.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct ContactFields {
    /// Full name (required on create).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Primary email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Mobile number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    /// Company ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<u64>,

    /// Job title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

impl ContactFields {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Returns true if at least one way to reach the contact is set.
    pub fn has_channel(&self) -> bool {
        self.email.is_some() || self.phone.is_some() || self.mobile.is_some()
    }
}

/// A customer company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    /// Unique company ID.
    pub id: u64,

    /// Company name.
    #[serde(default)]
    pub name: Option<String>,

    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Email domains mapped to this company.
    #[serde(default)]
    pub domains: Vec<String>,

    /// Internal note.
    #[serde(default)]
    pub note: Option<String>,

    /// Health score.
    #[serde(default)]
    pub health_score: Option<String>,

    /// Account tier.
    #[serde(default)]
    pub account_tier: Option<String>,

    /// Creation time (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update time (ISO 8601).
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Company {
    /// Returns the name or the ID.
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.to_string())
    }
}

/// Payload for creating or updating a company. Only set fields are sent.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct CompanyFields {
    /// Company name (required on create).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Replacement domain list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<String>>,

    /// Internal note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CompanyFields {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
