//! Integration tests for the share-request lifecycle over HTTP.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use http::StatusCode;

use noteshare_core::error::AppError;
use noteshare_core::result::AppResult;
use noteshare_service::share::grant::AccessGrant;

struct DownGrant {
    calls: AtomicU32,
}

#[async_trait::async_trait]
impl AccessGrant for DownGrant {
    async fn grant(&self, _: &str, _: &str) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::external_service("notes service returned 500"))
    }
}

#[tokio::test]
async fn test_share_then_accept() {
    let app = helpers::TestApp::new();
    let mut alice_socket = app.connect("alice@x.com");
    let mut bob_socket = app.connect("bob@x.com");

    let request = app.share("bob@x.com", "alice@x.com", "n1", "Trip").await;
    assert_eq!(request["type"], "SHARE_REQUEST");
    assert_eq!(request["status"], "PENDING");
    assert_eq!(request["noteId"], "n1");
    assert_eq!(request["noteTitle"], "Trip");
    assert!(request["respondedAt"].is_null());
    let id = request["id"].as_str().unwrap().to_string();

    let pushed = helpers::next_frame(&mut bob_socket).await;
    assert_eq!(pushed["type"], "notification");
    assert_eq!(pushed["notification"]["id"], id.as_str());

    let response = app
        .request(
            "POST",
            &format!("/api/notifications/{id}/accept"),
            Some(serde_json::json!({ "userEmail": "bob@x.com" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Share request accepted");
    assert_eq!(response.body["request"]["status"], "ACCEPTED");
    assert!(response.body["request"]["respondedAt"].is_string());

    let follow_up = &response.body["followUp"];
    assert_eq!(follow_up["type"], "SHARE_ACCEPTED");
    assert_eq!(follow_up["status"], "READ");
    assert_eq!(follow_up["recipientEmail"], "alice@x.com");
    assert_eq!(follow_up["senderEmail"], "bob@x.com");
    assert_eq!(follow_up["relatedId"], id.as_str());

    let pushed = helpers::next_frame(&mut alice_socket).await;
    assert_eq!(pushed["notification"]["type"], "SHARE_ACCEPTED");

    let inbox = app.request("GET", "/api/notifications/user/alice@x.com", None).await;
    assert_eq!(inbox.status, StatusCode::OK);
    let inbox = inbox.body.as_array().unwrap().clone();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0]["type"], "SHARE_ACCEPTED");
}

#[tokio::test]
async fn test_third_party_cannot_answer() {
    let app = helpers::TestApp::new();
    let request = app.share("bob@x.com", "alice@x.com", "n1", "Trip").await;
    let id = request["id"].as_str().unwrap();

    let response = app
        .request(
            "POST",
            &format!("/api/notifications/{id}/accept"),
            Some(serde_json::json!({ "userEmail": "carol@x.com" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");

    let current = app.request("GET", &format!("/api/notifications/{id}"), None).await;
    assert_eq!(current.body["status"], "PENDING");
}

#[tokio::test]
async fn test_second_answer_conflicts() {
    let app = helpers::TestApp::new();
    let request = app.share("bob@x.com", "alice@x.com", "n1", "Trip").await;
    let id = request["id"].as_str().unwrap();
    let body = serde_json::json!({ "userEmail": "bob@x.com" });

    let first = app
        .request("POST", &format!("/api/notifications/{id}/reject"), Some(body.clone()))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["message"], "Share request rejected");
    assert_eq!(first.body["followUp"]["type"], "SHARE_REJECTED");

    let second = app
        .request("POST", &format!("/api/notifications/{id}/accept"), Some(body))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "INVALID_STATE");
    assert_eq!(app.store.len().await, 2);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = helpers::TestApp::new();
    let body = serde_json::json!({ "userEmail": "bob@x.com" });

    let unknown = app
        .request(
            "POST",
            "/api/notifications/0190f5a4-0000-7000-8000-000000000000/accept",
            Some(body.clone()),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let malformed = app
        .request("POST", "/api/notifications/42/accept", Some(body))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_grant_failure_reverts_request() {
    let grant = Arc::new(DownGrant {
        calls: AtomicU32::new(0),
    });
    let app = helpers::TestApp::with_grant(grant.clone());
    let request = app.share("bob@x.com", "alice@x.com", "n1", "Trip").await;
    let id = request["id"].as_str().unwrap();

    let response = app
        .request(
            "POST",
            &format!("/api/notifications/{id}/accept"),
            Some(serde_json::json!({ "userEmail": "bob@x.com" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["error"], "ACCESS_GRANT_FAILED");
    assert_eq!(grant.calls.load(Ordering::SeqCst), 3);

    let current = app.request("GET", &format!("/api/notifications/{id}"), None).await;
    assert_eq!(current.body["status"], "PENDING");

    let sender_inbox = app.request("GET", "/api/notifications/user/alice@x.com", None).await;
    assert_eq!(sender_inbox.body.as_array().unwrap().len(), 0);
}
