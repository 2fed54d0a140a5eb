//! Company operations.

use crate::client::FreshdeskClient;
use crate::error::GatewayError;
use crate::models::{Company, CompanyFields, Page};

use super::{require_text, validate_id};

fn validate_fields(fields: &CompanyFields) -> Result<(), GatewayError> {
    if let Some(name) = &fields.name {
        require_text(name, "name")?;
    }
    if let Some(domains) = &fields.domains {
        if domains.iter().any(|d| d.trim().is_empty() || d.contains('/')) {
            return Err(GatewayError::validation(
                "domains must be bare domain names, e.g. acme.com",
            ));
        }
    }
    Ok(())
}

impl FreshdeskClient {
    /// Lists companies.
    pub async fn list_companies(&self, page: Page) -> Result<Vec<Company>, GatewayError> {
        page.validate()?;
        self.get("/companies", page.to_query()).await
    }

    /// Gets one company.
    pub async fn get_company(&self, id: u64) -> Result<Company, GatewayError> {
        validate_id(id, "company_id")?;
        self.get(&format!("/companies/{}", id), Vec::new()).await
    }

    /// Creates a company. The name is required.
    pub async fn create_company(&self, fields: &CompanyFields) -> Result<Company, GatewayError> {
        if fields.name.is_none() {
            return Err(GatewayError::validation("name is required"));
        }
        validate_fields(fields)?;
        self.post("/companies", fields).await
    }

    /// Updates the given fields of a company.
    pub async fn update_company(
        &self,
        id: u64,
        fields: &CompanyFields,
    ) -> Result<Company, GatewayError> {
        validate_id(id, "company_id")?;
        if fields.is_empty() {
            return Err(GatewayError::validation(
                "at least one field must be provided to update",
            ));
        }
        validate_fields(fields)?;
        self.put(&format!("/companies/{}", id), fields).await
    }
}
