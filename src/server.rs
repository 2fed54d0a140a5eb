//! MCP server implementation for Freshgate.
//!
//! This module defines the `FreshgateServer` struct that implements the MCP
//! `ServerHandler` trait, exposing Freshdesk operations as tools.
//!
//! Every tool except `ping` is gated: the caller's grant is checked against
//! the tool's requirement before any input is turned into a request. A denied
//! call never touches the client.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};

use crate::access::{authorize, AccessDecision, Grant, Requirement};
use crate::client::FreshdeskClient;
use crate::error::GatewayError;
use crate::models::Page;
use crate::tools::format::*;
use crate::tools::requirements::*;
use crate::tools::{
    AddNoteInput, AgentIdInput, CompanyIdInput, ContactIdInput, CreateCompanyInput,
    CreateContactInput, CreateTicketInput, DeleteTicketInput, GetTicketInput, ListAgentsInput,
    ListContactsInput, ListConversationsInput, ListTicketsInput, PageInput, ReplyToTicketInput,
    SearchTicketsInput, UpdateCompanyInput, UpdateContactInput, UpdateTicketInput,
};

/// The Freshgate MCP server.
///
/// This server exposes Freshdesk operations as MCP tools.
#[derive(Clone)]
pub struct FreshgateServer {
    /// Freshdesk client for API operations.
    client: FreshdeskClient,
    /// The caller's grant. `None` denies every gated tool.
    grant: Option<Grant>,
    /// Tool router for MCP tool dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl FreshgateServer {
    /// Creates a new server instance.
    ///
    /// # Arguments
    ///
    /// * `client` - The Freshdesk client for API operations
    /// * `grant` - What the caller may do; `None` denies all gated tools
    pub fn new(client: FreshdeskClient, grant: Option<Grant>) -> Self {
        Self {
            client,
            grant,
            tool_router: Self::tool_router(),
        }
    }

    /// Returns the caller's grant.
    pub fn grant(&self) -> Option<&Grant> {
        self.grant.as_ref()
    }

    /// A simple ping tool to verify the server is running.
    ///
    /// Returns "pong" on success.
    #[tool(description = "Test connectivity to the Freshgate MCP server. Returns 'pong' if the server is running correctly.")]
    fn ping(&self) -> String {
        tracing::debug!("ping tool called");
        "pong".to_string()
    }

    #[tool(description = "Show the client-side request budget: calls remaining in the current one-minute window and when it resets.")]
    fn rate_limit_status(&self) -> Result<String, String> {
        self.guard("rate_limit_status", "read rate limit status", &RATE_LIMIT_STATUS)?;
        Ok(format_rate_limit(&self.client.rate_limit_info()))
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    /// List tickets with optional filters.
    #[tool(description = "List helpdesk tickets. Can filter by predefined view, requester, company, or update time, and sort. Without filters returns tickets created in the last 30 days.")]
    async fn list_tickets(
        &self,
        Parameters(input): Parameters<ListTicketsInput>,
    ) -> Result<String, String> {
        const OP: &str = "list tickets";
        self.guard("list_tickets", OP, &LIST_TICKETS)?;

        let input = input.sanitize();
        tracing::debug!(?input, "list_tickets tool called");

        let tickets = self
            .client
            .list_tickets(&input.to_filter())
            .await
            .map_err(|e| self.fail(OP, &e))?;

        Ok(format_ticket_list(&tickets))
    }

    /// Get full details of a single ticket.
    #[tool(description = "Get full details of a single ticket, optionally with its replies and notes.")]
    async fn get_ticket(
        &self,
        Parameters(input): Parameters<GetTicketInput>,
    ) -> Result<String, String> {
        let op = format!("get ticket {}", input.ticket_id);
        let include_conversations = input.include_conversations.unwrap_or(false);
        let requirement = if include_conversations {
            &GET_TICKET_WITH_CONVERSATIONS
        } else {
            &GET_TICKET
        };
        self.guard("get_ticket", &op, requirement)?;

        tracing::debug!(ticket_id = input.ticket_id, include_conversations, "get_ticket tool called");

        let ticket = self
            .client
            .get_ticket(input.ticket_id, include_conversations)
            .await
            .map_err(|e| self.fail(&op, &e))?;

        Ok(format_ticket_details(&ticket))
    }

    #[tool(description = "Search tickets with a query such as \"priority:4 AND status:2\" or \"tag:'vpn'\". Use single quotes around string values. Returns up to 30 results per page, pages 1-10.")]
    async fn search_tickets(
        &self,
        Parameters(input): Parameters<SearchTicketsInput>,
    ) -> Result<String, String> {
        const OP: &str = "search tickets";
        self.guard("search_tickets", OP, &SEARCH_TICKETS)?;

        let input = input.sanitize();
        tracing::debug!(query = %input.query, "search_tickets tool called");

        let page = input.page.unwrap_or(1);
        let results = self
            .client
            .search_tickets(&input.query, Some(page))
            .await
            .map_err(|e| self.fail(OP, &e))?;

        Ok(format_search_results(&results, page))
    }

    /// Create a new ticket.
    #[tool(description = "Create a new ticket. Subject and either email or requester_id are required. Status defaults to open and priority to low. Returns the created ticket with its ID.")]
    async fn create_ticket(
        &self,
        Parameters(input): Parameters<CreateTicketInput>,
    ) -> Result<String, String> {
        const OP: &str = "create ticket";
        self.guard("create_ticket", OP, &CREATE_TICKET)?;

        let input = input.sanitize();
        tracing::debug!(subject = %input.subject, "create_ticket tool called");

        let new_ticket = input.to_new_ticket().map_err(|e| self.fail(OP, &e))?;
        let ticket = self
            .client
            .create_ticket(&new_ticket)
            .await
            .map_err(|e| self.fail(OP, &e))?;

        Ok(format_create_result(&ticket))
    }

    #[tool(description = "Update a ticket's subject, description, status, priority, type, assignee, group, or tags. At least one field besides ticket_id is required.")]
    async fn update_ticket(
        &self,
        Parameters(input): Parameters<UpdateTicketInput>,
    ) -> Result<String, String> {
        let op = format!("update ticket {}", input.ticket_id);
        self.guard("update_ticket", &op, &UPDATE_TICKET)?;

        let input = input.sanitize();
        tracing::debug!(ticket_id = input.ticket_id, "update_ticket tool called");

        let update = input.to_update().map_err(|e| self.fail(&op, &e))?;
        let ticket = self
            .client
            .update_ticket(input.ticket_id, &update)
            .await
            .map_err(|e| self.fail(&op, &e))?;

        Ok(format_update_result(&ticket))
    }

    #[tool(description = "Delete a ticket (moves it to trash). Requires admin access.")]
    async fn delete_ticket(
        &self,
        Parameters(input): Parameters<DeleteTicketInput>,
    ) -> Result<String, String> {
        let op = format!("delete ticket {}", input.ticket_id);
        self.guard("delete_ticket", &op, &DELETE_TICKET)?;

        tracing::debug!(ticket_id = input.ticket_id, "delete_ticket tool called");

        self.client
            .delete_ticket(input.ticket_id)
            .await
            .map_err(|e| self.fail(&op, &e))?;

        Ok(format!("Deleted ticket #{}.", input.ticket_id))
    }

    // ========================================================================
    // Conversations
    // ========================================================================

    #[tool(description = "List the replies and notes of a ticket, oldest first.")]
    async fn list_conversations(
        &self,
        Parameters(input): Parameters<ListConversationsInput>,
    ) -> Result<String, String> {
        let op = format!("list conversations of ticket {}", input.ticket_id);
        self.guard("list_conversations", &op, &LIST_CONVERSATIONS)?;

        tracing::debug!(ticket_id = input.ticket_id, "list_conversations tool called");

        let conversations = self
            .client
            .list_conversations(input.ticket_id, Page::new(input.page, input.per_page))
            .await
            .map_err(|e| self.fail(&op, &e))?;

        Ok(format_conversation_list(input.ticket_id, &conversations))
    }

    /// Reply to the requester of a ticket.
    #[tool(description = "Send a public reply on a ticket. The requester receives it by email.")]
    async fn reply_to_ticket(
        &self,
        Parameters(input): Parameters<ReplyToTicketInput>,
    ) -> Result<String, String> {
        let op = format!("reply to ticket {}", input.ticket_id);
        self.guard("reply_to_ticket", &op, &REPLY_TO_TICKET)?;

        let input = input.sanitize();
        tracing::debug!(ticket_id = input.ticket_id, "reply_to_ticket tool called");

        let conversation = self
            .client
            .reply_to_ticket(input.ticket_id, &input.to_reply())
            .await
            .map_err(|e| self.fail(&op, &e))?;

        Ok(format_conversation_result("Reply", input.ticket_id, &conversation))
    }

    /// Add a note to a ticket.
    #[tool(description = "Add a note to a ticket. Notes are private (agents only) unless private is set to false.")]
    async fn add_note(
        &self,
        Parameters(input): Parameters<AddNoteInput>,
    ) -> Result<String, String> {
        let op = format!("add note to ticket {}", input.ticket_id);
        self.guard("add_note", &op, &ADD_NOTE)?;

        let input = input.sanitize();
        tracing::debug!(ticket_id = input.ticket_id, "add_note tool called");

        let conversation = self
            .client
            .add_note(input.ticket_id, &input.to_note())
            .await
            .map_err(|e| self.fail(&op, &e))?;

        Ok(format_conversation_result("Note", input.ticket_id, &conversation))
    }

    // ========================================================================
    // Contacts
    // ========================================================================

    #[tool(description = "List contacts (customers). Can filter by email, phone, mobile, company, or state.")]
    async fn list_contacts(
        &self,
        Parameters(input): Parameters<ListContactsInput>,
    ) -> Result<String, String> {
        const OP: &str = "list contacts";
        self.guard("list_contacts", OP, &LIST_CONTACTS)?;

        let input = input.sanitize();
        tracing::debug!(?input, "list_contacts tool called");

        let contacts = self
            .client
            .list_contacts(&input.to_filter())
            .await
            .map_err(|e| self.fail(OP, &e))?;

        Ok(format_contact_list(&contacts))
    }

    #[tool(description = "Get the details of a single contact.")]
    async fn get_contact(
        &self,
        Parameters(input): Parameters<ContactIdInput>,
    ) -> Result<String, String> {
        let op = format!("get contact {}", input.contact_id);
        self.guard("get_contact", &op, &GET_CONTACT)?;

        let contact = self
            .client
            .get_contact(input.contact_id)
            .await
            .map_err(|e| self.fail(&op, &e))?;

        Ok(format_contact_details(&contact))
    }

    #[tool(description = "Create a contact. Name and at least one of email, phone, or mobile are required.")]
    async fn create_contact(
        &self,
        Parameters(input): Parameters<CreateContactInput>,
    ) -> Result<String, String> {
        const OP: &str = "create contact";
        self.guard("create_contact", OP, &CREATE_CONTACT)?;

        let input = input.sanitize();
        tracing::debug!("create_contact tool called");

        let contact = self
            .client
            .create_contact(&input.to_fields())
            .await
            .map_err(|e| self.fail(OP, &e))?;

        Ok(format!(
            "Created contact #{}: {}\n",
            contact.id,
            contact.display_name()
        ))
    }

    #[tool(description = "Update a contact's name, email, phone, mobile, company, or job title. At least one field besides contact_id is required.")]
    async fn update_contact(
        &self,
        Parameters(input): Parameters<UpdateContactInput>,
    ) -> Result<String, String> {
        let op = format!("update contact {}", input.contact_id);
        self.guard("update_contact", &op, &UPDATE_CONTACT)?;

        let input = input.sanitize();
        let contact = self
            .client
            .update_contact(input.contact_id, &input.to_fields())
            .await
            .map_err(|e| self.fail(&op, &e))?;

        Ok(format!(
            "Updated contact #{}: {}\n",
            contact.id,
            contact.display_name()
        ))
    }

    #[tool(description = "Soft-delete a contact. It can be restored from the helpdesk. Requires admin access.")]
    async fn delete_contact(
        &self,
        Parameters(input): Parameters<ContactIdInput>,
    ) -> Result<String, String> {
        let op = format!("delete contact {}", input.contact_id);
        self.guard("delete_contact", &op, &DELETE_CONTACT)?;

        self.client
            .delete_contact(input.contact_id)
            .await
            .map_err(|e| self.fail(&op, &e))?;

        Ok(format!("Deleted contact #{}.", input.contact_id))
    }

    // ========================================================================
    // Agents
    // ========================================================================

    /// List agents available for ticket assignment.
    #[tool(description = "List helpdesk agents. Returns IDs and names. Use the ID as responder_id when assigning tickets.")]
    async fn list_agents(
        &self,
        Parameters(input): Parameters<ListAgentsInput>,
    ) -> Result<String, String> {
        const OP: &str = "list agents";
        self.guard("list_agents", OP, &LIST_AGENTS)?;

        let input = input.sanitize();
        tracing::debug!(?input, "list_agents tool called");

        let agents = self
            .client
            .list_agents(&input.to_filter())
            .await
            .map_err(|e| self.fail(OP, &e))?;

        Ok(format_agent_list(&agents))
    }

    #[tool(description = "Get the details of a single agent.")]
    async fn get_agent(
        &self,
        Parameters(input): Parameters<AgentIdInput>,
    ) -> Result<String, String> {
        let op = format!("get agent {}", input.agent_id);
        self.guard("get_agent", &op, &GET_AGENT)?;

        let agent = self
            .client
            .get_agent(input.agent_id)
            .await
            .map_err(|e| self.fail(&op, &e))?;

        Ok(format_agent_details(&agent))
    }

    #[tool(description = "Get the agent that owns the configured API key.")]
    async fn get_current_agent(&self) -> Result<String, String> {
        const OP: &str = "get current agent";
        self.guard("get_current_agent", OP, &GET_CURRENT_AGENT)?;

        let agent = self
            .client
            .get_current_agent()
            .await
            .map_err(|e| self.fail(OP, &e))?;

        Ok(format_agent_details(&agent))
    }

    // ========================================================================
    // Companies
    // ========================================================================

    #[tool(description = "List customer companies.")]
    async fn list_companies(
        &self,
        Parameters(input): Parameters<PageInput>,
    ) -> Result<String, String> {
        const OP: &str = "list companies";
        self.guard("list_companies", OP, &LIST_COMPANIES)?;

        let companies = self
            .client
            .list_companies(input.to_page())
            .await
            .map_err(|e| self.fail(OP, &e))?;

        Ok(format_company_list(&companies))
    }

    #[tool(description = "Get the details of a single company.")]
    async fn get_company(
        &self,
        Parameters(input): Parameters<CompanyIdInput>,
    ) -> Result<String, String> {
        let op = format!("get company {}", input.company_id);
        self.guard("get_company", &op, &GET_COMPANY)?;

        let company = self
            .client
            .get_company(input.company_id)
            .await
            .map_err(|e| self.fail(&op, &e))?;

        Ok(format_company_details(&company))
    }

    #[tool(description = "Create a company. The name is required and must be unique.")]
    async fn create_company(
        &self,
        Parameters(input): Parameters<CreateCompanyInput>,
    ) -> Result<String, String> {
        const OP: &str = "create company";
        self.guard("create_company", OP, &CREATE_COMPANY)?;

        let input = input.sanitize();
        let company = self
            .client
            .create_company(&input.to_fields())
            .await
            .map_err(|e| self.fail(OP, &e))?;

        Ok(format!(
            "Created company #{}: {}\n",
            company.id,
            company.display_name()
        ))
    }

    #[tool(description = "Update a company's name, description, domains, or note. At least one field besides company_id is required.")]
    async fn update_company(
        &self,
        Parameters(input): Parameters<UpdateCompanyInput>,
    ) -> Result<String, String> {
        let op = format!("update company {}", input.company_id);
        self.guard("update_company", &op, &UPDATE_COMPANY)?;

        let input = input.sanitize();
        let company = self
            .client
            .update_company(input.company_id, &input.to_fields())
            .await
            .map_err(|e| self.fail(&op, &e))?;

        Ok(format!(
            "Updated company #{}: {}\n",
            company.id,
            company.display_name()
        ))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Runs the access gate for a tool.
    fn guard(&self, tool: &str, operation: &str, requirement: &Requirement) -> Result<(), String> {
        match authorize(self.grant.as_ref(), requirement) {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny(reason) => {
                tracing::warn!(tool = tool, reason = %reason, "Access denied");
                Err(self.fail(operation, &GatewayError::access_denied(tool, reason)))
            }
        }
    }

    /// Renders a failure as `[kind] Failed to <operation>: <message>`.
    fn fail(&self, operation: &str, error: &GatewayError) -> String {
        let sanitized = error.sanitized_display(self.client.api_key_for_sanitization());
        if !matches!(error, GatewayError::AccessDenied { .. }) {
            tracing::error!(
                error = %sanitized,
                kind = %error.kind(),
                "Failed to {}",
                operation
            );
        }
        format!("[{}] Failed to {}: {}", error.kind(), operation, sanitized)
    }
}

#[tool_handler]
impl ServerHandler for FreshgateServer {
    /// Returns server information for the MCP initialize handshake.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Freshgate provides access to a Freshdesk helpdesk. \
                 Use list_tickets, search_tickets and get_ticket to find tickets, \
                 list_conversations to read the thread, and reply_to_ticket or add_note to respond. \
                 Create and modify tickets with create_ticket and update_ticket. \
                 Contacts, companies and agents have their own list/get tools. \
                 Failures are prefixed with their kind: [validation] means fix the input, \
                 [rate limit], [server error] and [network] mean try later, \
                 [authorization] means the operation is not allowed for this caller. \
                 Start with 'ping' to verify connectivity."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{AccessLevel, Permission};
    use crate::config::Config;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(domain: &str) -> Config {
        let mut config = Config::new(domain, "test_key_12345");
        config.retry_base = Duration::from_millis(1);
        config
    }

    fn server_for(domain: &str, grant: Option<Grant>) -> FreshgateServer {
        let client = FreshdeskClient::new(&test_config(domain)).unwrap();
        FreshgateServer::new(client, grant)
    }

    fn admin() -> Grant {
        Grant::new(AccessLevel::Admin, Permission::ALL)
    }

    #[test]
    fn test_server_info_has_tools_capability() {
        let server = server_for("acme", None);
        let info = server.get_info();
        assert!(info.instructions.is_some());
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_ping_tool_returns_pong() {
        let server = server_for("acme", None);
        assert_eq!(server.ping(), "pong");
    }

    #[test]
    fn test_rate_limit_status_needs_read_level() {
        let server = server_for("acme", None);
        let err = server.rate_limit_status().unwrap_err();
        assert!(err.starts_with("[authorization] Failed to read rate limit status"));

        let server = server_for("acme", Some(Grant::new(AccessLevel::Read, [])));
        let status = server.rate_limit_status().unwrap();
        assert!(status.contains("50 of 50 remaining"));
    }

    #[tokio::test]
    async fn test_denied_tool_sends_no_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&mock_server)
            .await;

        let grant = Grant::new(AccessLevel::Write, Permission::ALL);
        let server = server_for(&mock_server.uri(), Some(grant));
        let err = server
            .delete_ticket(Parameters(DeleteTicketInput { ticket_id: 42 }))
            .await
            .unwrap_err();

        assert!(err.starts_with("[authorization] Failed to delete ticket 42"));
        assert!(err.contains("requires access level admin"));
    }

    #[tokio::test]
    async fn test_missing_grant_denies_reads() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server.uri(), None);
        let err = server
            .list_tickets(Parameters(ListTicketsInput::default()))
            .await
            .unwrap_err();
        assert!(err.contains("no access grant"));
    }

    #[tokio::test]
    async fn test_conversations_need_extra_permission() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 1})))
            .expect(0)
            .mount(&mock_server)
            .await;

        let grant = Grant::new(AccessLevel::Read, [Permission::TicketsRead]);
        let server = server_for(&mock_server.uri(), Some(grant));
        let err = server
            .get_ticket(Parameters(GetTicketInput {
                ticket_id: 1,
                include_conversations: Some(true),
            }))
            .await
            .unwrap_err();
        assert!(err.contains("conversations:read"));
    }

    #[tokio::test]
    async fn test_allowed_tool_reaches_api() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/tickets/20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 20,
                "subject": "Printer on fire",
                "status": 2,
                "priority": 4
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server.uri(), Some(admin()));
        let output = server
            .get_ticket(Parameters(GetTicketInput {
                ticket_id: 20,
                include_conversations: None,
            }))
            .await
            .unwrap();
        assert!(output.starts_with("Ticket #20: Printer on fire"));
    }

    #[tokio::test]
    async fn test_remote_failure_is_prefixed_with_kind() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/contacts/7"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server.uri(), Some(admin()));
        let err = server
            .get_contact(Parameters(ContactIdInput { contact_id: 7 }))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            "[not found] Failed to get contact 7: not found error (HTTP 404): Not Found"
        );
    }

    #[tokio::test]
    async fn test_invalid_input_is_validation_and_sends_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server.uri(), Some(admin()));
        let input: CreateTicketInput =
            serde_json::from_str(r#"{"subject": "No requester"}"#).unwrap();
        let err = server.create_ticket(Parameters(input)).await.unwrap_err();
        assert!(err.starts_with("[validation] Failed to create ticket"));
        assert!(err.contains("either email or requester_id is required"));
    }
}
