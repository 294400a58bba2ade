//! Notification dispatcher: pushes records to a user's live sockets.

use std::sync::Arc;

use async_trait::async_trait;

use noteshare_core::result::AppResult;
use noteshare_entity::notification::Notification;
use noteshare_service::share::delivery::{PushOutcome, RealtimeChannel};

use crate::connection::manager::ConnectionManager;
use crate::message::types::OutboundMessage;

/// WebSocket implementation of the real-time channel.
///
/// Offline users simply miss the push; the record stays in the store and
/// shows up in their next listing.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    /// Connection manager for sending WS frames
    connections: Arc<ConnectionManager>,
}

impl NotificationDispatcher {
    /// Create a new dispatcher
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl RealtimeChannel for NotificationDispatcher {
    async fn push(&self, target: &str, notification: &Notification) -> AppResult<PushOutcome> {
        let message = OutboundMessage::Notification {
            notification: notification.clone(),
        };
        match self.connections.send_to_user(target, &message)? {
            0 => {
                tracing::trace!(recipient = %target, "No live connection for notification");
                Ok(PushOutcome::Undelivered)
            }
            n => Ok(PushOutcome::Delivered(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use noteshare_core::config::RealtimeConfig;
    use noteshare_core::types::id::NotificationId;
    use noteshare_entity::notification::NewNotification;

    #[tokio::test]
    async fn test_push_reports_outcome() {
        let connections = Arc::new(ConnectionManager::new(RealtimeConfig::default()));
        let dispatcher = NotificationDispatcher::new(connections.clone());
        let record = NewNotification::share_request("bob@x.com", "alice@x.com", "n1", "Trip", Utc::now())
            .into_notification(NotificationId::new());

        let outcome = dispatcher.push("bob@x.com", &record).await.unwrap();
        assert_eq!(outcome, PushOutcome::Undelivered);

        let (_handle, mut rx) = connections.register("bob@x.com".into());
        let outcome = dispatcher.push("bob@x.com", &record).await.unwrap();
        assert_eq!(outcome, PushOutcome::Delivered(1));

        let frame: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(frame["type"], "notification");
        assert_eq!(frame["notification"]["id"], record.id.to_string());
    }
}
