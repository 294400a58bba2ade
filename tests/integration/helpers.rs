//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;

use noteshare_api::{AppState, build_app};
use noteshare_core::config::AppConfig;
use noteshare_database::MemoryNotificationStore;
use noteshare_service::share::grant::{AccessGrant, NoopAccessGrant};

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Shared state, for reaching the real-time engine directly
    pub state: AppState,
    /// Backing store for direct inspection
    pub store: MemoryNotificationStore,
}

impl TestApp {
    /// Create a new test application on the in-memory store
    pub fn new() -> Self {
        Self::with_grant(Arc::new(NoopAccessGrant))
    }

    /// Create a test application with a custom access grant
    pub fn with_grant(grant: Arc<dyn AccessGrant>) -> Self {
        let mut config = AppConfig::default();
        config.grant.retry_backoff_ms = 0;

        let store = MemoryNotificationStore::new();
        let state = AppState::new(config, Arc::new(store.clone()), grant);
        let router = build_app(state.clone());

        Self {
            router,
            state,
            store,
        }
    }

    /// Open a fake socket for `email` on the real-time engine
    pub fn connect(&self, email: &str) -> mpsc::Receiver<String> {
        let (_handle, rx) = self.state.realtime.connections.register(email.to_string());
        rx
    }

    /// Create a share request through the API and return the record
    pub async fn share(&self, recipient: &str, sender: &str, note_id: &str, title: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/notifications/share-request",
                Some(serde_json::json!({
                    "recipientEmail": recipient,
                    "senderEmail": sender,
                    "noteId": note_id,
                    "noteTitle": title,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "share failed: {:?}", response.body);
        response.body
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Next frame pushed to a fake socket, parsed
pub async fn next_frame(rx: &mut mpsc::Receiver<String>) -> Value {
    let frame = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("frame within a second")
        .expect("socket open");
    serde_json::from_str(&frame).expect("frame is JSON")
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
