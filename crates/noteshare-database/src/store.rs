//! The notification store abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use noteshare_core::result::AppResult;
use noteshare_core::types::id::NotificationId;
use noteshare_entity::notification::{NewNotification, Notification, NotificationStatus};

/// Durable holder of notification records.
///
/// Listings are ordered by `created_at` descending; records created at the
/// same instant come back newest insertion first. Implementations must
/// make [`transition_status`](Self::transition_status) and
/// [`revert_response`](Self::revert_response) compare-and-set operations
/// scoped to a single record.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Persist a new record and return it with its assigned id.
    async fn insert(&self, new: NewNotification) -> AppResult<Notification>;

    /// Look up a record by id.
    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>>;

    /// All records addressed to `email`.
    async fn list_by_recipient(&self, email: &str) -> AppResult<Vec<Notification>>;

    /// All records originated by `email`.
    async fn list_by_sender(&self, email: &str) -> AppResult<Vec<Notification>>;

    /// Number of share requests addressed to `email` still awaiting an answer.
    async fn count_pending_for_recipient(&self, email: &str) -> AppResult<i64>;

    /// Move a record from `from` to `to`, stamping `responded_at`.
    ///
    /// Returns the updated record, or `None` when the record does not exist
    /// or its status is no longer `from`.
    async fn transition_status(
        &self,
        id: NotificationId,
        from: NotificationStatus,
        to: NotificationStatus,
        responded_at: DateTime<Utc>,
    ) -> AppResult<Option<Notification>>;

    /// Undo a response: move the record from `from` back to `Pending` and
    /// clear `responded_at`. Returns `None` when the status is no longer `from`.
    async fn revert_response(
        &self,
        id: NotificationId,
        from: NotificationStatus,
    ) -> AppResult<Option<Notification>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
