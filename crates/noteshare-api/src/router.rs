//! Route definitions for the NoteShare HTTP API.
//!
//! REST routes are mounted under `/api`; the WebSocket upgrade lives at `/ws`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(notification_routes())
        .merge(health_routes());

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_upgrade));

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Share requests and notification history
fn notification_routes() -> Router<AppState> {
    use handlers::notification as n;

    Router::new()
        .route("/notifications/share-request", post(n::create_share_request))
        .route("/notifications/{id}", get(n::get_notification))
        .route("/notifications/{id}/accept", post(n::accept))
        .route("/notifications/{id}/reject", post(n::reject))
        .route("/notifications/user/{email}", get(n::list_received))
        .route(
            "/notifications/user/{email}/pending-count",
            get(n::pending_count),
        )
        .route("/notifications/sent/{email}", get(n::list_sent))
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
