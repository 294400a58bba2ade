//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/notifications/share-request`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequestBody {
    /// Who the note is offered to.
    #[validate(length(min = 1, message = "recipientEmail is required"))]
    pub recipient_email: String,
    /// Who offers the note.
    #[validate(length(min = 1, message = "senderEmail is required"))]
    pub sender_email: String,
    /// Shared note identifier.
    #[serde(alias = "resourceId")]
    #[validate(length(min = 1, message = "noteId is required"))]
    pub note_id: String,
    /// Shared note title.
    #[serde(alias = "resourceTitle")]
    #[validate(length(min = 1, message = "noteTitle is required"))]
    pub note_title: String,
}

/// Body of the accept and reject endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RespondBody {
    /// Identity of the user answering the request.
    #[validate(length(min = 1, message = "userEmail is required"))]
    pub user_email: String,
}

/// Query of the WebSocket upgrade.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WsQuery {
    /// Identity whose inbox the socket follows.
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
}
