//! Notification type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a notification record is about. Set at creation and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// A sender proposes sharing a note with the recipient.
    ShareRequest,
    /// The recipient of a share request accepted it.
    ShareAccepted,
    /// The recipient of a share request rejected it.
    ShareRejected,
}

impl NotificationType {
    /// Whether records of this type carry a pending/terminal lifecycle.
    pub fn is_request(&self) -> bool {
        matches!(self, Self::ShareRequest)
    }

    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShareRequest => "share_request",
            Self::ShareAccepted => "share_accepted",
            Self::ShareRejected => "share_rejected",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
