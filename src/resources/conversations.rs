//! Conversation operations: listing, replies and notes.

use crate::client::FreshdeskClient;
use crate::error::GatewayError;
use crate::models::{Conversation, NewNote, NewReply, Page};

use super::{require_text, validate_email, validate_id};

impl FreshdeskClient {
    /// Lists the replies and notes of a ticket, oldest first.
    pub async fn list_conversations(
        &self,
        ticket_id: u64,
        page: Page,
    ) -> Result<Vec<Conversation>, GatewayError> {
        validate_id(ticket_id, "ticket_id")?;
        page.validate()?;
        self.get(
            &format!("/tickets/{}/conversations", ticket_id),
            page.to_query(),
        )
        .await
    }

    /// Sends a public reply to the requester.
    pub async fn reply_to_ticket(
        &self,
        ticket_id: u64,
        reply: &NewReply,
    ) -> Result<Conversation, GatewayError> {
        validate_id(ticket_id, "ticket_id")?;
        require_text(&reply.body, "body")?;
        for cc in &reply.cc_emails {
            validate_email(cc, "cc_emails")?;
        }
        self.post(&format!("/tickets/{}/reply", ticket_id), reply)
            .await
    }

    /// Adds a note, private unless stated otherwise.
    pub async fn add_note(
        &self,
        ticket_id: u64,
        note: &NewNote,
    ) -> Result<Conversation, GatewayError> {
        validate_id(ticket_id, "ticket_id")?;
        require_text(&note.body, "body")?;
        for email in &note.notify_emails {
            validate_email(email, "notify_emails")?;
        }
        self.post(&format!("/tickets/{}/notes", ticket_id), note)
            .await
    }
}
