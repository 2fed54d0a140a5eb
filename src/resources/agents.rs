//! Agent operations. Agents are read-only through this gateway.

use crate::client::FreshdeskClient;
use crate::error::GatewayError;
use crate::models::{Agent, Page};

use super::{validate_choice, validate_email, validate_id};

const STATES: &[&str] = &["fulltime", "occasional"];

/// Filters for listing agents.
#[derive(Debug, Clone, Default)]
pub struct AgentFilter {
    /// Exact email match.
    pub email: Option<String>,
    /// `fulltime` or `occasional`.
    pub state: Option<String>,
    /// Pagination.
    pub page: Page,
}

impl AgentFilter {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = self.page.to_query();
        if let Some(email) = &self.email {
            query.push(("email".to_string(), email.clone()));
        }
        if let Some(state) = &self.state {
            query.push(("state".to_string(), state.clone()));
        }
        query
    }
}

impl FreshdeskClient {
    /// Lists agents.
    pub async fn list_agents(&self, filter: &AgentFilter) -> Result<Vec<Agent>, GatewayError> {
        if let Some(email) = &filter.email {
            validate_email(email, "email")?;
        }
        if let Some(state) = &filter.state {
            validate_choice(state, STATES, "state")?;
        }
        filter.page.validate()?;
        self.get("/agents", filter.to_query()).await
    }

    /// Gets one agent.
    pub async fn get_agent(&self, id: u64) -> Result<Agent, GatewayError> {
        validate_id(id, "agent_id")?;
        self.get(&format!("/agents/{}", id), Vec::new()).await
    }

    /// Gets the agent owning the configured API key.
    pub async fn get_current_agent(&self) -> Result<Agent, GatewayError> {
        self.get("/agents/me", Vec::new()).await
    }
}
