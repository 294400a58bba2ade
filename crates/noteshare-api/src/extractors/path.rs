//! Typed path parameter helpers.

use noteshare_core::error::AppError;
use noteshare_core::types::id::NotificationId;

/// Parses a notification id from a path segment.
pub fn parse_notification_id(s: &str) -> Result<NotificationId, AppError> {
    s.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid notification id: {s}")))
}
