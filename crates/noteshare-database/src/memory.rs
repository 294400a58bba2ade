//! In-memory notification store for single-node deployments and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use noteshare_core::result::AppResult;
use noteshare_core::types::id::NotificationId;
use noteshare_entity::notification::{NewNotification, Notification, NotificationStatus};

use crate::store::NotificationStore;

/// Records in insertion order plus an id index.
#[derive(Debug, Default)]
struct InnerState {
    records: Vec<Notification>,
    by_id: HashMap<NotificationId, usize>,
}

impl InnerState {
    /// Matching records, newest first, ties broken by later insertion first.
    fn collect_newest_first<F>(&self, predicate: F) -> Vec<Notification>
    where
        F: Fn(&Notification) -> bool,
    {
        let mut matches: Vec<Notification> = self
            .records
            .iter()
            .rev()
            .filter(|n| predicate(n))
            .cloned()
            .collect();
        // Stable sort keeps the reversed insertion order among equal timestamps.
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches
    }

    fn get_mut(&mut self, id: NotificationId) -> Option<&mut Notification> {
        let idx = *self.by_id.get(&id)?;
        self.records.get_mut(idx)
    }
}

/// Process-local notification store guarded by a Tokio `RwLock`.
///
/// Status changes run under the write lock, which makes the check and the
/// write of [`NotificationStore::transition_status`] one atomic step.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotificationStore {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryNotificationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored records.
    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn insert(&self, new: NewNotification) -> AppResult<Notification> {
        let notification = new.into_notification(NotificationId::new());
        let mut state = self.state.write().await;
        let idx = state.records.len();
        state.by_id.insert(notification.id, idx);
        state.records.push(notification.clone());
        Ok(notification)
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        let state = self.state.read().await;
        Ok(state
            .by_id
            .get(&id)
            .and_then(|idx| state.records.get(*idx))
            .cloned())
    }

    async fn list_by_recipient(&self, email: &str) -> AppResult<Vec<Notification>> {
        let state = self.state.read().await;
        Ok(state.collect_newest_first(|n| n.recipient_email == email))
    }

    async fn list_by_sender(&self, email: &str) -> AppResult<Vec<Notification>> {
        let state = self.state.read().await;
        Ok(state.collect_newest_first(|n| n.sender_email == email))
    }

    async fn count_pending_for_recipient(&self, email: &str) -> AppResult<i64> {
        let state = self.state.read().await;
        let count = state
            .records
            .iter()
            .filter(|n| n.recipient_email == email && n.is_pending_request())
            .count();
        Ok(count as i64)
    }

    async fn transition_status(
        &self,
        id: NotificationId,
        from: NotificationStatus,
        to: NotificationStatus,
        responded_at: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        let mut state = self.state.write().await;
        match state.get_mut(id) {
            Some(record) if record.status == from => {
                record.status = to;
                record.responded_at = Some(responded_at);
                Ok(Some(record.clone()))
            }
            _ => {
                debug!(notification_id = %id, from = %from, to = %to, "Status compare-and-set missed");
                Ok(None)
            }
        }
    }

    async fn revert_response(
        &self,
        id: NotificationId,
        from: NotificationStatus,
    ) -> AppResult<Option<Notification>> {
        let mut state = self.state.write().await;
        match state.get_mut(id) {
            Some(record) if record.status == from => {
                record.status = NotificationStatus::Pending;
                record.responded_at = None;
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;
    use noteshare_entity::notification::NotificationType;

    fn request_at(recipient: &str, sender: &str, note: &str, at: DateTime<Utc>) -> NewNotification {
        NewNotification::share_request(recipient, sender, note, format!("Title {note}"), at)
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_is_findable() {
        let store = MemoryNotificationStore::new();
        let saved = store
            .insert(request_at("bob@x.com", "alice@x.com", "n1", Utc::now()))
            .await
            .unwrap();

        let found = store.find_by_id(saved.id).await.unwrap();
        assert_eq!(found, Some(saved));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_unknown_returns_none() {
        let store = MemoryNotificationStore::new();
        assert!(store.find_by_id(NotificationId::new()).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_listing_is_newest_first_with_insertion_tiebreak() {
        let store = MemoryNotificationStore::new();
        let base = Utc::now();

        let old = store
            .insert(request_at("bob@x.com", "alice@x.com", "old", base - Duration::seconds(10)))
            .await
            .unwrap();
        let tie_first = store
            .insert(request_at("bob@x.com", "alice@x.com", "tie1", base))
            .await
            .unwrap();
        let tie_second = store
            .insert(request_at("bob@x.com", "carol@x.com", "tie2", base))
            .await
            .unwrap();
        store
            .insert(request_at("dave@x.com", "alice@x.com", "other", base))
            .await
            .unwrap();

        let ids: Vec<_> = store
            .list_by_recipient("bob@x.com")
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec![tie_second.id, tie_first.id, old.id]);

        let sent: Vec<_> = store
            .list_by_sender("alice@x.com")
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.resource_id)
            .collect();
        assert_eq!(sent, vec!["other", "tie1", "old"]);
    }

    #[tokio::test]
    async fn test_transition_is_compare_and_set() {
        let store = MemoryNotificationStore::new();
        let saved = store
            .insert(request_at("bob@x.com", "alice@x.com", "n1", Utc::now()))
            .await
            .unwrap();

        let accepted = store
            .transition_status(
                saved.id,
                NotificationStatus::Pending,
                NotificationStatus::Accepted,
                Utc::now(),
            )
            .await
            .unwrap()
            .expect("first transition wins");
        assert_eq!(accepted.status, NotificationStatus::Accepted);
        assert!(accepted.responded_at.is_some());

        let second = store
            .transition_status(
                saved.id,
                NotificationStatus::Pending,
                NotificationStatus::Rejected,
                Utc::now(),
            )
            .await
            .unwrap();
        assert!(second.is_none());

        let current = store.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(current.status, NotificationStatus::Accepted);
    }

    #[tokio::test]
    async fn test_revert_response_restores_pending() {
        let store = MemoryNotificationStore::new();
        let saved = store
            .insert(request_at("bob@x.com", "alice@x.com", "n1", Utc::now()))
            .await
            .unwrap();
        store
            .transition_status(
                saved.id,
                NotificationStatus::Pending,
                NotificationStatus::Accepted,
                Utc::now(),
            )
            .await
            .unwrap();

        let reverted = store
            .revert_response(saved.id, NotificationStatus::Accepted)
            .await
            .unwrap()
            .expect("revert applies");
        assert_eq!(reverted.status, NotificationStatus::Pending);
        assert!(reverted.responded_at.is_none());

        let again = store
            .revert_response(saved.id, NotificationStatus::Accepted)
            .await
            .unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn test_pending_count_ignores_answered_and_follow_ups() {
        let store = MemoryNotificationStore::new();
        let now = Utc::now();
        let first = store
            .insert(request_at("bob@x.com", "alice@x.com", "n1", now))
            .await
            .unwrap();
        store
            .insert(request_at("bob@x.com", "alice@x.com", "n2", now))
            .await
            .unwrap();
        let mut follow_up = request_at("bob@x.com", "carol@x.com", "n3", now);
        follow_up.kind = NotificationType::ShareAccepted;
        follow_up.status = NotificationStatus::Read;
        store.insert(follow_up).await.unwrap();

        assert_eq!(store.count_pending_for_recipient("bob@x.com").await.unwrap(), 2);

        store
            .transition_status(
                first.id,
                NotificationStatus::Pending,
                NotificationStatus::Rejected,
                now,
            )
            .await
            .unwrap();
        assert_eq!(store.count_pending_for_recipient("bob@x.com").await.unwrap(), 1);
    }
}
