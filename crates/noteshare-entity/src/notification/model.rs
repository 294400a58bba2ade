//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use noteshare_core::types::id::NotificationId;

use super::decision::ShareDecision;
use super::kind::NotificationType;
use super::status::NotificationStatus;

/// A persisted notification record.
///
/// Serialized in camelCase with `noteId`/`noteTitle`/`type` keys, which is
/// the shape the notes web client consumes over REST and WebSocket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Store-assigned identifier.
    pub id: NotificationId,
    /// Addressee of this record.
    pub recipient_email: String,
    /// Originator of the underlying action.
    pub sender_email: String,
    /// Identifier of the shared note.
    #[serde(rename = "noteId")]
    pub resource_id: String,
    /// Display title of the shared note.
    #[serde(rename = "noteTitle")]
    pub resource_title: String,
    /// Notification type.
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Lifecycle status.
    pub status: NotificationStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the recipient answered (share requests only).
    pub responded_at: Option<DateTime<Utc>>,
    /// For follow-up records, the share request they answer.
    pub related_id: Option<NotificationId>,
}

impl Notification {
    /// Whether this is a share request still waiting for an answer.
    pub fn is_pending_request(&self) -> bool {
        self.kind.is_request() && self.status == NotificationStatus::Pending
    }

    /// Whether `email` is the addressee of this record.
    pub fn is_addressed_to(&self, email: &str) -> bool {
        self.recipient_email == email
    }
}

/// A notification about to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    /// Addressee.
    pub recipient_email: String,
    /// Originator.
    pub sender_email: String,
    /// Shared note identifier.
    pub resource_id: String,
    /// Shared note title.
    pub resource_title: String,
    /// Notification type.
    pub kind: NotificationType,
    /// Initial status.
    pub status: NotificationStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Link to the share request, for follow-ups.
    pub related_id: Option<NotificationId>,
}

impl NewNotification {
    /// A fresh share request from `sender_email` to `recipient_email`.
    pub fn share_request(
        recipient_email: impl Into<String>,
        sender_email: impl Into<String>,
        resource_id: impl Into<String>,
        resource_title: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            recipient_email: recipient_email.into(),
            sender_email: sender_email.into(),
            resource_id: resource_id.into(),
            resource_title: resource_title.into(),
            kind: NotificationType::ShareRequest,
            status: NotificationStatus::Pending,
            created_at,
            related_id: None,
        }
    }

    /// The record telling the original sender how `request` was answered.
    ///
    /// Sender and recipient are swapped and the record is created `Read`.
    pub fn follow_up(
        request: &Notification,
        decision: ShareDecision,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            recipient_email: request.sender_email.clone(),
            sender_email: request.recipient_email.clone(),
            resource_id: request.resource_id.clone(),
            resource_title: request.resource_title.clone(),
            kind: decision.follow_up_type(),
            status: NotificationStatus::Read,
            created_at,
            related_id: Some(request.id),
        }
    }

    /// Materialize the record under a store-assigned id.
    pub fn into_notification(self, id: NotificationId) -> Notification {
        Notification {
            id,
            recipient_email: self.recipient_email,
            sender_email: self.sender_email,
            resource_id: self.resource_id,
            resource_title: self.resource_title,
            kind: self.kind,
            status: self.status,
            created_at: self.created_at,
            responded_at: None,
            related_id: self.related_id,
        }
    }
}
