//! Notification status and the share-request state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a notification record.
///
/// A share request starts `Pending` and moves exactly once to `Accepted` or
/// `Rejected`. `Read` is only ever assigned when a follow-up record is
/// created; no transition leads into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_status", rename_all = "lowercase")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatus {
    /// Awaiting the recipient's decision.
    Pending,
    /// The recipient accepted the request.
    Accepted,
    /// The recipient rejected the request.
    Rejected,
    /// Informational record, created already acknowledged.
    Read,
}

impl NotificationStatus {
    /// Check whether `self -> next` is a legal transition.
    pub fn can_transition_to(&self, next: NotificationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted) | (Self::Pending, Self::Rejected)
        )
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Read => "read",
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [NotificationStatus; 4] = [
        NotificationStatus::Pending,
        NotificationStatus::Accepted,
        NotificationStatus::Rejected,
        NotificationStatus::Read,
    ];

    #[test]
    fn test_only_pending_can_move() {
        for from in ALL {
            for to in ALL {
                let expected = from == NotificationStatus::Pending
                    && matches!(to, NotificationStatus::Accepted | NotificationStatus::Rejected);
                assert_eq!(from.can_transition_to(to), expected, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&NotificationStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
        let parsed: NotificationStatus = serde_json::from_str("\"READ\"").unwrap();
        assert_eq!(parsed, NotificationStatus::Read);
    }
}
