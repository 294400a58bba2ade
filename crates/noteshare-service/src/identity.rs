//! Normalization of caller-supplied identities and labels.

use noteshare_core::error::AppError;

/// Canonical form of an email identity: trimmed and lower-cased.
///
/// Fails with a validation error naming `field` when nothing is left.
pub fn normalize_email(raw: &str, field: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(email)
}

/// Owned copy of `raw` exactly as given, rejecting blank values.
pub fn require_non_empty(raw: &str, field: &str) -> Result<String, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(raw.to_string())
}
