//! Share-request lifecycle: creation, acceptance, rejection.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, warn};

use noteshare_core::config::GrantConfig;
use noteshare_core::error::AppError;
use noteshare_core::result::AppResult;
use noteshare_core::types::id::NotificationId;
use noteshare_database::store::NotificationStore;
use noteshare_entity::notification::{
    NewNotification, Notification, NotificationStatus, ShareDecision,
};

use super::delivery::{RealtimeChannel, dispatch_detached};
use super::grant::AccessGrant;
use crate::identity::{normalize_email, require_non_empty};

/// Bounded retry applied to the access grant on acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantRetryPolicy {
    /// Total attempts, at least one.
    pub max_attempts: u32,
    /// Base delay; attempt `n` waits `n * backoff` before retrying.
    pub backoff: Duration,
}

impl GrantRetryPolicy {
    /// Retry policy taken from the grant configuration.
    pub fn from_config(config: &GrantConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }
}

impl Default for GrantRetryPolicy {
    fn default() -> Self {
        Self::from_config(&GrantConfig::default())
    }
}

/// Outcome of answering a share request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    /// The share request in its terminal state.
    pub request: Notification,
    /// The record telling the original sender about the answer.
    pub follow_up: Notification,
}

/// Owner of the share-request state machine.
///
/// Every state change goes through this service. Records are persisted
/// before anything is pushed, and pushes run detached so a slow or broken
/// connection never holds up the caller.
#[derive(Clone)]
pub struct ShareLifecycleService {
    store: Arc<dyn NotificationStore>,
    channel: Arc<dyn RealtimeChannel>,
    grant: Arc<dyn AccessGrant>,
    retry: GrantRetryPolicy,
}

impl ShareLifecycleService {
    /// Creates a new lifecycle service.
    pub fn new(
        store: Arc<dyn NotificationStore>,
        channel: Arc<dyn RealtimeChannel>,
        grant: Arc<dyn AccessGrant>,
        retry: GrantRetryPolicy,
    ) -> Self {
        Self {
            store,
            channel,
            grant,
            retry,
        }
    }

    /// Record a new share request and push it to the recipient.
    pub async fn create_share_request(
        &self,
        recipient_email: &str,
        sender_email: &str,
        resource_id: &str,
        resource_title: &str,
    ) -> AppResult<Notification> {
        let recipient = normalize_email(recipient_email, "recipientEmail")?;
        let sender = normalize_email(sender_email, "senderEmail")?;
        let resource_id = require_non_empty(resource_id, "noteId")?;
        let resource_title = require_non_empty(resource_title, "noteTitle")?;

        let request = self
            .store
            .insert(NewNotification::share_request(
                recipient,
                sender,
                resource_id,
                resource_title,
                Utc::now(),
            ))
            .await?;

        info!(
            notification_id = %request.id,
            recipient = %request.recipient_email,
            sender = %request.sender_email,
            resource_id = %request.resource_id,
            "Share request created"
        );

        dispatch_detached(
            Arc::clone(&self.channel),
            request.recipient_email.clone(),
            request.clone(),
        );

        Ok(request)
    }

    /// Accept or reject a pending share request on behalf of its recipient.
    ///
    /// Exactly one answer wins per request; later or concurrent answers get
    /// a conflict. On acceptance the recipient is granted access before the
    /// follow-up is written. If the grant keeps failing, or the follow-up
    /// cannot be stored, the request goes back to pending and the error is
    /// returned.
    pub async fn respond(
        &self,
        id: NotificationId,
        acting_email: &str,
        decision: ShareDecision,
    ) -> AppResult<ShareResponse> {
        let request = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))?;

        let acting = normalize_email(acting_email, "userEmail")?;

        if !request.is_addressed_to(&acting) {
            warn!(
                notification_id = %id,
                acting = %acting,
                decision = %decision,
                "Share response rejected, caller is not the recipient"
            );
            return Err(AppError::authorization(
                "Only the recipient can respond to this share request",
            ));
        }

        if !request.kind.is_request() {
            return Err(AppError::conflict(format!(
                "Notification {id} is a {} and cannot be answered",
                request.kind
            )));
        }

        let target = decision.target_status();
        if !request.status.can_transition_to(target) {
            return Err(AppError::conflict(format!(
                "Share request {id} is already {}",
                request.status
            )));
        }

        let answered = self
            .store
            .transition_status(id, NotificationStatus::Pending, target, Utc::now())
            .await?
            .ok_or_else(|| {
                AppError::conflict(format!("Share request {id} was answered concurrently"))
            })?;

        if decision == ShareDecision::Accept {
            if let Err(e) = self.grant_with_retry(&answered).await {
                self.revert_answer(&answered, "Access grant failed").await;
                return Err(e);
            }
        }

        let follow_up = match self
            .store
            .insert(NewNotification::follow_up(&answered, decision, Utc::now()))
            .await
        {
            Ok(follow_up) => follow_up,
            Err(e) => {
                self.revert_answer(&answered, "Follow-up could not be stored").await;
                return Err(e);
            }
        };

        info!(
            notification_id = %id,
            follow_up_id = %follow_up.id,
            recipient = %answered.recipient_email,
            sender = %answered.sender_email,
            decision = %decision,
            "Share request answered"
        );

        dispatch_detached(
            Arc::clone(&self.channel),
            follow_up.recipient_email.clone(),
            follow_up.clone(),
        );

        Ok(ShareResponse {
            request: answered,
            follow_up,
        })
    }

    async fn grant_with_retry(&self, request: &Notification) -> AppResult<()> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self
                .grant
                .grant(&request.resource_id, &request.recipient_email)
                .await
            {
                Ok(()) => return Ok(()),
                Err(e) if attempt >= max_attempts => return Err(e),
                Err(e) => {
                    warn!(
                        notification_id = %request.id,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Access grant failed, retrying"
                    );
                    tokio::time::sleep(self.retry.delay_after(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Put an answered request back to pending after a later step failed.
    async fn revert_answer(&self, request: &Notification, cause: &str) {
        match self.store.revert_response(request.id, request.status).await {
            Ok(Some(_)) => error!(
                notification_id = %request.id,
                recipient = %request.recipient_email,
                status = %request.status,
                cause,
                "Share request reverted to pending"
            ),
            Ok(None) => error!(
                notification_id = %request.id,
                status = %request.status,
                cause,
                "Share request changed before it could be reverted"
            ),
            Err(e) => error!(
                notification_id = %request.id,
                status = %request.status,
                cause,
                error = %e,
                "Share request could not be reverted"
            ),
        }
    }
}
