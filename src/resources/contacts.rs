//! Contact operations.

use crate::client::FreshdeskClient;
use crate::error::GatewayError;
use crate::models::{Contact, ContactFields, Page};

use super::{require_text, validate_choice, validate_email, validate_id};

const STATES: &[&str] = &["verified", "unverified", "blocked", "deleted"];

/// Filters for listing contacts.
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    /// Exact email match.
    pub email: Option<String>,
    /// Exact phone match.
    pub phone: Option<String>,
    /// Exact mobile match.
    pub mobile: Option<String>,
    /// Only contacts of this company.
    pub company_id: Option<u64>,
    /// `verified`, `unverified`, `blocked` or `deleted`.
    pub state: Option<String>,
    /// Pagination.
    pub page: Page,
}

impl ContactFilter {
    fn validate(&self) -> Result<(), GatewayError> {
        if let Some(email) = &self.email {
            validate_email(email, "email")?;
        }
        if let Some(id) = self.company_id {
            validate_id(id, "company_id")?;
        }
        if let Some(state) = &self.state {
            validate_choice(state, STATES, "state")?;
        }
        self.page.validate()
    }

    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = self.page.to_query();
        let optional = [
            ("email", self.email.clone()),
            ("phone", self.phone.clone()),
            ("mobile", self.mobile.clone()),
            ("company_id", self.company_id.map(|v| v.to_string())),
            ("state", self.state.clone()),
        ];
        query.extend(
            optional
                .into_iter()
                .filter_map(|(k, v)| v.map(|v| (k.to_string(), v))),
        );
        query
    }
}

fn validate_fields(fields: &ContactFields) -> Result<(), GatewayError> {
    if let Some(name) = &fields.name {
        require_text(name, "name")?;
    }
    if let Some(email) = &fields.email {
        validate_email(email, "email")?;
    }
    if let Some(id) = fields.company_id {
        validate_id(id, "company_id")?;
    }
    Ok(())
}

impl FreshdeskClient {
    /// Lists contacts matching the filter.
    pub async fn list_contacts(
        &self,
        filter: &ContactFilter,
    ) -> Result<Vec<Contact>, GatewayError> {
        filter.validate()?;
        self.get("/contacts", filter.to_query()).await
    }

    /// Gets one contact.
    pub async fn get_contact(&self, id: u64) -> Result<Contact, GatewayError> {
        validate_id(id, "contact_id")?;
        self.get(&format!("/contacts/{}", id), Vec::new()).await
    }

    /// Creates a contact. A name and at least one of email, phone or mobile
    /// are required.
    pub async fn create_contact(&self, fields: &ContactFields) -> Result<Contact, GatewayError> {
        if fields.name.is_none() {
            return Err(GatewayError::validation("name is required"));
        }
        if !fields.has_channel() {
            return Err(GatewayError::validation(
                "at least one of email, phone or mobile is required",
            ));
        }
        validate_fields(fields)?;
        self.post("/contacts", fields).await
    }

    /// Updates the given fields of a contact.
    pub async fn update_contact(
        &self,
        id: u64,
        fields: &ContactFields,
    ) -> Result<Contact, GatewayError> {
        validate_id(id, "contact_id")?;
        if fields.is_empty() {
            return Err(GatewayError::validation(
                "at least one field must be provided to update",
            ));
        }
        validate_fields(fields)?;
        self.put(&format!("/contacts/{}", id), fields).await
    }

    /// Soft-deletes a contact. It stays restorable from the helpdesk UI.
    pub async fn delete_contact(&self, id: u64) -> Result<(), GatewayError> {
        validate_id(id, "contact_id")?;
        self.delete(&format!("/contacts/{}", id)).await
    }
}
