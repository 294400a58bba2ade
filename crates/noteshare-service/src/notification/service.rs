//! Notification history queries.

use std::sync::Arc;

use tracing::debug;

use noteshare_core::error::AppError;
use noteshare_core::result::AppResult;
use noteshare_core::types::id::NotificationId;
use noteshare_database::store::NotificationStore;
use noteshare_entity::notification::Notification;

use crate::identity::normalize_email;

/// Read-only access to stored notifications.
#[derive(Clone)]
pub struct NotificationQueryService {
    /// Notification store.
    store: Arc<dyn NotificationStore>,
}

impl NotificationQueryService {
    /// Creates a new query service.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Records addressed to `email`, newest first.
    pub async fn list_for_recipient(&self, email: &str) -> AppResult<Vec<Notification>> {
        let email = normalize_email(email, "email")?;
        let records = self.store.list_by_recipient(&email).await?;
        debug!(recipient = %email, count = records.len(), "Listed received notifications");
        Ok(records)
    }

    /// Records originated by `email`, newest first.
    pub async fn list_for_sender(&self, email: &str) -> AppResult<Vec<Notification>> {
        let email = normalize_email(email, "email")?;
        let records = self.store.list_by_sender(&email).await?;
        debug!(sender = %email, count = records.len(), "Listed sent notifications");
        Ok(records)
    }

    /// A single record.
    pub async fn get(&self, id: NotificationId) -> AppResult<Notification> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))
    }

    /// Share requests addressed to `email` still awaiting an answer.
    pub async fn pending_count(&self, email: &str) -> AppResult<i64> {
        let email = normalize_email(email, "email")?;
        self.store.count_pending_for_recipient(&email).await
    }

    /// Whether the backing store answers.
    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await.unwrap_or(false)
    }
}
