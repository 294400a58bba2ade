//! PostgreSQL notification store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use noteshare_core::error::{AppError, ErrorKind};
use noteshare_core::result::AppResult;
use noteshare_core::types::id::NotificationId;
use noteshare_entity::notification::{NewNotification, Notification, NotificationStatus};

use crate::store::NotificationStore;

const COLUMNS: &str = "id, recipient_email, sender_email, resource_id, resource_title, \
                       kind, status, created_at, responded_at, related_id";

/// Repository for the `notifications` table.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn insert(&self, new: NewNotification) -> AppResult<Notification> {
        let id = NotificationId::new();
        sqlx::query_as::<_, Notification>(&format!(
            "INSERT INTO notifications (id, recipient_email, sender_email, resource_id, resource_title, \
             kind, status, created_at, related_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&new.recipient_email)
        .bind(&new.sender_email)
        .bind(&new.resource_id)
        .bind(&new.resource_title)
        .bind(new.kind)
        .bind(new.status)
        .bind(new.created_at)
        .bind(new.related_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notification", e))
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find notification", e))
    }

    async fn list_by_recipient(&self, email: &str) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {COLUMNS} FROM notifications WHERE recipient_email = $1 \
             ORDER BY created_at DESC, seq DESC"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))
    }

    async fn list_by_sender(&self, email: &str) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {COLUMNS} FROM notifications WHERE sender_email = $1 \
             ORDER BY created_at DESC, seq DESC"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list sent notifications", e)
        })
    }

    async fn count_pending_for_recipient(&self, email: &str) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE recipient_email = $1 AND kind = 'share_request' AND status = 'pending'",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count pending", e))
    }

    async fn transition_status(
        &self,
        id: NotificationId,
        from: NotificationStatus,
        to: NotificationStatus,
        responded_at: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        let updated = sqlx::query_as::<_, Notification>(&format!(
            "UPDATE notifications SET status = $3, responded_at = $4 \
             WHERE id = $1 AND status = $2 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(from)
        .bind(to)
        .bind(responded_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update status", e))?;

        if updated.is_none() {
            debug!(notification_id = %id, from = %from, to = %to, "Status compare-and-set missed");
        }
        Ok(updated)
    }

    async fn revert_response(
        &self,
        id: NotificationId,
        from: NotificationStatus,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(&format!(
            "UPDATE notifications SET status = 'pending', responded_at = NULL \
             WHERE id = $1 AND status = $2 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(from)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revert response", e))
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
