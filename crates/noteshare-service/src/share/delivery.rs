//! Best-effort real-time delivery of notification records.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use noteshare_core::result::AppResult;
use noteshare_entity::notification::Notification;

/// Result of a push attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Handed to this many live connections.
    Delivered(usize),
    /// The target had no live connection.
    Undelivered,
}

/// Transport that pushes a record to an identity's live connections.
#[async_trait]
pub trait RealtimeChannel: Send + Sync + 'static {
    /// Attempt to push `notification` to every live connection of `target`.
    async fn push(&self, target: &str, notification: &Notification) -> AppResult<PushOutcome>;
}

/// Push `notification` to `target` on a detached task.
///
/// The outcome is logged and otherwise dropped: delivery never feeds back
/// into the operation that produced the record.
pub fn dispatch_detached(
    channel: Arc<dyn RealtimeChannel>,
    target: String,
    notification: Notification,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match channel.push(&target, &notification).await {
            Ok(PushOutcome::Delivered(connections)) => debug!(
                notification_id = %notification.id,
                recipient = %target,
                connections,
                "Notification pushed"
            ),
            Ok(PushOutcome::Undelivered) => debug!(
                notification_id = %notification.id,
                recipient = %target,
                "Target offline, notification left in store"
            ),
            Err(e) => warn!(
                notification_id = %notification.id,
                recipient = %target,
                error = %e,
                "Real-time delivery failed"
            ),
        }
    })
}
