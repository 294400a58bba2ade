//! Inbound and outbound WebSocket message type definitions.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use noteshare_core::types::id::NotificationId;
use noteshare_entity::notification::Notification;

/// Messages sent by the client to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Pong response to server ping.
    Pong {
        /// Echoed timestamp.
        timestamp: i64,
    },
    /// Acknowledge receipt of a pushed notification.
    Ack {
        /// Notification being acknowledged.
        notification_id: NotificationId,
    },
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// A notification record addressed to the connected user.
    Notification {
        /// The record, in its REST shape.
        notification: Notification,
    },
    /// Ping (server keepalive), epoch milliseconds.
    Ping {
        /// Server timestamp.
        timestamp: i64,
    },
    /// Error message.
    Error {
        /// Error code.
        code: String,
        /// Error description.
        message: String,
    },
}

impl OutboundMessage {
    /// Ping stamped with the current time.
    pub fn ping() -> Self {
        Self::Ping {
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Serialize into a text frame.
    pub fn to_frame(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
