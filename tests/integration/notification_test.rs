//! Integration tests for notification queries, validation, and health.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_inbox_and_sent_lists_are_newest_first() {
    let app = helpers::TestApp::new();
    let first = app.share("bob@x.com", "alice@x.com", "n1", "Trip").await;
    let second = app.share("bob@x.com", "carol@x.com", "n2", "Budget").await;
    app.share("dave@x.com", "alice@x.com", "n3", "Recipes").await;

    let inbox = app.request("GET", "/api/notifications/user/bob@x.com", None).await;
    assert_eq!(inbox.status, StatusCode::OK);
    let ids: Vec<_> = inbox
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].clone())
        .collect();
    assert_eq!(ids, vec![second["id"].clone(), first["id"].clone()]);

    let sent = app.request("GET", "/api/notifications/sent/alice@x.com", None).await;
    let notes: Vec<_> = sent
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["noteId"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(notes, vec!["n3", "n1"]);
}

#[tokio::test]
async fn test_pending_count_tracks_answers() {
    let app = helpers::TestApp::new();
    let first = app.share("bob@x.com", "alice@x.com", "n1", "Trip").await;
    app.share("bob@x.com", "alice@x.com", "n2", "Budget").await;

    let count = app
        .request("GET", "/api/notifications/user/bob@x.com/pending-count", None)
        .await;
    assert_eq!(count.status, StatusCode::OK);
    assert_eq!(count.body["count"], 2);

    let id = first["id"].as_str().unwrap();
    app.request(
        "POST",
        &format!("/api/notifications/{id}/reject"),
        Some(serde_json::json!({ "userEmail": "bob@x.com" })),
    )
    .await;

    let count = app
        .request("GET", "/api/notifications/user/bob@x.com/pending-count", None)
        .await;
    assert_eq!(count.body["count"], 1);
}

#[tokio::test]
async fn test_emails_are_normalized() {
    let app = helpers::TestApp::new();
    let request = app.share("  Bob@X.com", "ALICE@x.com ", "n1", "Trip").await;
    assert_eq!(request["recipientEmail"], "bob@x.com");
    assert_eq!(request["senderEmail"], "alice@x.com");

    let inbox = app.request("GET", "/api/notifications/user/BOB@x.com", None).await;
    assert_eq!(inbox.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_bodies_are_rejected() {
    let app = helpers::TestApp::new();

    let missing = app
        .request(
            "POST",
            "/api/notifications/share-request",
            Some(serde_json::json!({ "recipientEmail": "bob@x.com" })),
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["error"], "VALIDATION_ERROR");

    let empty = app
        .request(
            "POST",
            "/api/notifications/share-request",
            Some(serde_json::json!({
                "recipientEmail": "",
                "senderEmail": "alice@x.com",
                "noteId": "n1",
                "noteTitle": "Trip",
            })),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert!(empty.body["message"].as_str().unwrap().contains("recipientEmail"));

    let blank = app
        .request(
            "POST",
            "/api/notifications/share-request",
            Some(serde_json::json!({
                "recipientEmail": "   ",
                "senderEmail": "alice@x.com",
                "noteId": "n1",
                "noteTitle": "Trip",
            })),
        )
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_get_unknown_notification() {
    let app = helpers::TestApp::new();
    let response = app
        .request(
            "GET",
            "/api/notifications/0190f5a4-0000-7000-8000-000000000000",
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_health_reports_connections() {
    let app = helpers::TestApp::new();
    let _bob = app.connect("bob@x.com");
    let _bob_tab = app.connect("bob@x.com");

    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["store"], "connected");
    assert_eq!(response.body["wsConnections"], 2);
    assert_eq!(response.body["onlineUsers"], 1);
}
