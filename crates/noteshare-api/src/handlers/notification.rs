//! Notification handlers.

use axum::Json;
use axum::extract::{Path, State};

use noteshare_core::error::AppError;
use noteshare_entity::notification::{Notification, ShareDecision};

use crate::dto::request::{RespondBody, ShareRequestBody};
use crate::dto::response::{CountResponse, RespondResponse};
use crate::extractors::{ValidatedJson, parse_notification_id};
use crate::state::AppState;

/// POST /api/notifications/share-request
pub async fn create_share_request(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ShareRequestBody>,
) -> Result<Json<Notification>, AppError> {
    let notification = state
        .lifecycle
        .create_share_request(
            &body.recipient_email,
            &body.sender_email,
            &body.note_id,
            &body.note_title,
        )
        .await?;
    Ok(Json(notification))
}

/// POST /api/notifications/{id}/accept
pub async fn accept(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<RespondBody>,
) -> Result<Json<RespondResponse>, AppError> {
    respond(state, &id, body, ShareDecision::Accept).await
}

/// POST /api/notifications/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<RespondBody>,
) -> Result<Json<RespondResponse>, AppError> {
    respond(state, &id, body, ShareDecision::Reject).await
}

async fn respond(
    state: AppState,
    id: &str,
    body: RespondBody,
    decision: ShareDecision,
) -> Result<Json<RespondResponse>, AppError> {
    let id = parse_notification_id(id)?;
    let response = state
        .lifecycle
        .respond(id, &body.user_email, decision)
        .await?;

    let message = match decision {
        ShareDecision::Accept => "Share request accepted",
        ShareDecision::Reject => "Share request rejected",
    };
    Ok(Json(RespondResponse::new(message, response)))
}

/// GET /api/notifications/user/{email}
pub async fn list_received(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Notification>>, AppError> {
    Ok(Json(state.queries.list_for_recipient(&email).await?))
}

/// GET /api/notifications/sent/{email}
pub async fn list_sent(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Notification>>, AppError> {
    Ok(Json(state.queries.list_for_sender(&email).await?))
}

/// GET /api/notifications/user/{email}/pending-count
pub async fn pending_count(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.queries.pending_count(&email).await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/notifications/{id}
pub async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Notification>, AppError> {
    let id = parse_notification_id(&id)?;
    Ok(Json(state.queries.get(id).await?))
}
