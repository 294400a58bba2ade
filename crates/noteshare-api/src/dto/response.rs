//! Response DTOs.

use serde::Serialize;

use noteshare_entity::notification::Notification;
use noteshare_service::share::lifecycle::ShareResponse;

/// Answer to an accept or reject call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondResponse {
    /// "Share request accepted" or "Share request rejected".
    pub message: String,
    /// The share request in its final state.
    pub request: Notification,
    /// The record sent back to the original sender.
    pub follow_up: Notification,
}

impl RespondResponse {
    /// Wrap a lifecycle outcome with its acknowledgement message.
    pub fn new(message: impl Into<String>, response: ShareResponse) -> Self {
        Self {
            message: message.into(),
            request: response.request,
            follow_up: response.follow_up,
        }
    }
}

/// Pending-count response.
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    /// Number of share requests awaiting an answer.
    pub count: i64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// "ok" or "degraded".
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since startup.
    pub uptime_seconds: u64,
    /// Whether the notification store answers.
    pub store: String,
    /// Open WebSocket connections.
    pub ws_connections: usize,
    /// Distinct users with at least one socket.
    pub online_users: usize,
}
