//! Resource operations against a mock Freshdesk: paths, query strings and
//! payloads on the wire.

mod common;

use freshgate::error::ErrorKind;
use freshgate::models::{CompanyFields, ContactFields, NewNote, NewReply, NewTicket, Page, TicketUpdate};
use freshgate::resources::{AgentFilter, ContactFilter, TicketFilter};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client_for, AUTH_HEADER};

#[tokio::test]
async fn test_list_tickets_sends_filter_and_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/tickets"))
        .and(query_param("filter", "new_and_my_open"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "10"))
        .and(query_param("order_by", "updated_at"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "subject": "Printer on fire", "status": 2, "priority": 4},
            {"id": 2, "subject": "Password reset", "status": 3, "priority": 1}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let filter = TicketFilter {
        filter: Some("new_and_my_open".to_string()),
        order_by: Some("updated_at".to_string()),
        page: Page::new(Some(2), Some(10)),
        ..Default::default()
    };
    let tickets = client_for(&server).list_tickets(&filter).await.unwrap();

    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0].display_subject(), "Printer on fire");
    assert_eq!(tickets[1].status, Some(3));
}

#[tokio::test]
async fn test_invalid_filter_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let filter = TicketFilter {
        filter: Some("everything".to_string()),
        ..Default::default()
    };
    let err = client_for(&server).list_tickets(&filter).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_oversized_page_is_rejected_not_clamped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let filter = TicketFilter {
        page: Page::new(None, Some(500)),
        ..Default::default()
    };
    let err = client.list_tickets(&filter).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = client
        .list_conversations(42, Page::new(Some(0), None))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = client.list_companies(Page::new(None, Some(0))).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_get_ticket_with_conversations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/tickets/42"))
        .and(query_param("include", "conversations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "subject": "Refund",
            "conversations": [
                {"id": 7, "body_text": "Any update?", "incoming": true, "private": false}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ticket = client_for(&server).get_ticket(42, true).await.unwrap();
    let conversations = ticket.conversations.unwrap();
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0].display_content(), "Any update?");
}

#[tokio::test]
async fn test_search_wraps_query_in_quotes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/search/tickets"))
        .and(query_param("query", "\"priority:4 AND status:2\""))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 5, "subject": "Outage"}],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server)
        .search_tickets("  priority:4 AND status:2 ", None)
        .await
        .unwrap();
    assert_eq!(results.total, 1);
    assert_eq!(results.results[0].id, 5);
}

#[tokio::test]
async fn test_search_rejects_page_beyond_limit() {
    let server = MockServer::start().await;
    let err = client_for(&server)
        .search_tickets("status:2", Some(11))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_create_ticket_defaults_to_open_low() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/tickets"))
        .and(header("authorization", AUTH_HEADER))
        .and(body_json(json!({
            "subject": "Cannot log in",
            "description": "",
            "email": "jane@example.com",
            "status": 2,
            "priority": 1
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 100,
            "subject": "Cannot log in",
            "status": 2,
            "priority": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ticket = NewTicket {
        subject: "Cannot log in".to_string(),
        email: Some("jane@example.com".to_string()),
        ..Default::default()
    };
    let created = client_for(&server).create_ticket(&ticket).await.unwrap();
    assert_eq!(created.id, 100);
}

#[tokio::test]
async fn test_create_ticket_requires_requester() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let ticket = NewTicket {
        subject: "No requester".to_string(),
        ..Default::default()
    };
    let err = client_for(&server).create_ticket(&ticket).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("requester_id"));
}

#[tokio::test]
async fn test_update_ticket_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v2/tickets/42"))
        .and(body_json(json!({"status": 4})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42, "status": 4})))
        .expect(1)
        .mount(&server)
        .await;

    let update = TicketUpdate {
        status: Some(4),
        ..Default::default()
    };
    let ticket = client_for(&server).update_ticket(42, &update).await.unwrap();
    assert_eq!(ticket.status, Some(4));
}

#[tokio::test]
async fn test_update_ticket_without_fields_is_rejected() {
    let server = MockServer::start().await;
    let err = client_for(&server)
        .update_ticket(42, &TicketUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_delete_ticket_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/tickets/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).delete_ticket(42).await.unwrap();
}

#[tokio::test]
async fn test_list_conversations_paginates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/tickets/42/conversations"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "body_text": "Hello", "incoming": true, "private": false},
            {"id": 2, "body_text": "Internal", "incoming": false, "private": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let conversations = client_for(&server)
        .list_conversations(42, Page::default())
        .await
        .unwrap();
    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[1].visibility(), "Private note");
}

#[tokio::test]
async fn test_reply_posts_to_reply_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/tickets/42/reply"))
        .and(body_json(json!({"body": "We are on it."})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9, "body_text": "We are on it.", "ticket_id": 42
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = NewReply {
        body: "We are on it.".to_string(),
        cc_emails: Vec::new(),
    };
    let conversation = client_for(&server).reply_to_ticket(42, &reply).await.unwrap();
    assert_eq!(conversation.id, 9);
}

#[tokio::test]
async fn test_note_posts_to_notes_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/tickets/42/notes"))
        .and(body_json(json!({"body": "Escalated to tier 2", "private": true})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 10, "body_text": "Escalated to tier 2", "private": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let note = NewNote {
        body: "Escalated to tier 2".to_string(),
        private: true,
        notify_emails: Vec::new(),
    };
    let conversation = client_for(&server).add_note(42, &note).await.unwrap();
    assert_eq!(conversation.private, Some(true));
}

#[tokio::test]
async fn test_empty_reply_body_is_rejected() {
    let server = MockServer::start().await;
    let reply = NewReply {
        body: "   ".to_string(),
        cc_emails: Vec::new(),
    };
    let err = client_for(&server)
        .reply_to_ticket(42, &reply)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_list_contacts_by_email() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/contacts"))
        .and(query_param("email", "jane@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "name": "Jane Doe", "email": "jane@example.com"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let filter = ContactFilter {
        email: Some("jane@example.com".to_string()),
        ..Default::default()
    };
    let contacts = client_for(&server).list_contacts(&filter).await.unwrap();
    assert_eq!(contacts[0].display_name(), "Jane Doe");
}

#[tokio::test]
async fn test_create_contact_requires_channel() {
    let server = MockServer::start().await;
    let fields = ContactFields {
        name: Some("Jane Doe".to_string()),
        ..Default::default()
    };
    let err = client_for(&server).create_contact(&fields).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_create_and_delete_contact() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/contacts"))
        .and(body_json(json!({"name": "Jane Doe", "phone": "+15550100"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 3, "name": "Jane Doe", "phone": "+15550100"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/contacts/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let fields = ContactFields {
        name: Some("Jane Doe".to_string()),
        phone: Some("+15550100".to_string()),
        ..Default::default()
    };
    let contact = client.create_contact(&fields).await.unwrap();
    client.delete_contact(contact.id).await.unwrap();
}

#[tokio::test]
async fn test_current_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/agents/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11,
            "available": true,
            "contact": {"name": "Sam Support", "email": "sam@acme.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let agent = client_for(&server).get_current_agent().await.unwrap();
    assert_eq!(agent.id, 11);
    assert_eq!(agent.display_name(), "Sam Support");
    assert_eq!(agent.email(), Some("sam@acme.com"));
}

#[tokio::test]
async fn test_list_agents_by_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/agents"))
        .and(query_param("state", "occasional"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 12, "occasional": true, "contact": {"name": "Pat"}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let filter = AgentFilter {
        state: Some("occasional".to_string()),
        ..Default::default()
    };
    let agents = client_for(&server).list_agents(&filter).await.unwrap();
    assert_eq!(agents.len(), 1);
}

#[tokio::test]
async fn test_company_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/companies"))
        .and(body_json(json!({"name": "Acme", "domains": ["acme.com"]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 21, "name": "Acme", "domains": ["acme.com"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v2/companies/21"))
        .and(body_json(json!({"note": "Key account"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 21, "name": "Acme", "note": "Key account"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client
        .create_company(&CompanyFields {
            name: Some("Acme".to_string()),
            domains: Some(vec!["acme.com".to_string()]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.domains, vec!["acme.com".to_string()]);

    let updated = client
        .update_company(
            created.id,
            &CompanyFields {
                note: Some("Key account".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.note.as_deref(), Some("Key account"));
}

#[tokio::test]
async fn test_missing_company_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/companies/99"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).get_company(99).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.status(), Some(404));
}
