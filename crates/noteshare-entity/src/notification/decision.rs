//! The recipient's answer to a share request.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::kind::NotificationType;
use super::status::NotificationStatus;

/// Decision taken by the recipient of a share request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareDecision {
    /// Accept the share.
    Accept,
    /// Reject the share.
    Reject,
}

impl ShareDecision {
    /// Status the share request moves to.
    pub fn target_status(&self) -> NotificationStatus {
        match self {
            Self::Accept => NotificationStatus::Accepted,
            Self::Reject => NotificationStatus::Rejected,
        }
    }

    /// Type of the follow-up record sent back to the sender.
    pub fn follow_up_type(&self) -> NotificationType {
        match self {
            Self::Accept => NotificationType::ShareAccepted,
            Self::Reject => NotificationType::ShareRejected,
        }
    }

    /// Return the decision as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for ShareDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
