//! WebSocket upgrade handler.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use noteshare_core::error::AppError;
use noteshare_realtime::connection::heartbeat::run_heartbeat;
use noteshare_service::identity::normalize_email;

use crate::dto::request::WsQuery;
use crate::extractors::ValidatedQuery;
use crate::state::AppState;

/// GET /ws?email={email}
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<WsQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, AppError> {
    let email = normalize_email(&query.email, "email")?;
    Ok(ws.on_upgrade(move |socket| handle_ws_connection(state, email, socket)))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(state: AppState, email: String, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let connections = state.realtime.connections.clone();
    let (handle, mut outbound_rx) = connections.register(email);
    let conn_id = handle.id;

    let heartbeat = tokio::spawn(run_heartbeat(handle.clone(), state.realtime.heartbeat));

    // Outbound frames to the socket
    let mut outbound_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
        let _ = ws_tx.close().await;
    });

    loop {
        tokio::select! {
            inbound = ws_rx.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    connections.handle_inbound(&conn_id, text.as_str()).await;
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                    break;
                }
            },
            _ = handle.closed() => break,
            _ = &mut outbound_task => break,
        }
    }

    connections.unregister(&conn_id);
    heartbeat.abort();
    outbound_task.abort();

    info!(
        conn_id = %conn_id,
        email = %handle.email,
        "WebSocket connection closed"
    );
}
