//! Connection manager: connection lifecycle and message routing.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use noteshare_core::config::RealtimeConfig;
use noteshare_core::result::AppResult;
use noteshare_core::types::id::ConnectionId;

use crate::message::types::{InboundMessage, OutboundMessage};

use super::handle::ConnectionHandle;
use super::pool::ConnectionPool;

/// Manages all active WebSocket connections.
#[derive(Debug)]
pub struct ConnectionManager {
    /// Connection pool.
    pool: Arc<ConnectionPool>,
    /// Configuration.
    config: RealtimeConfig,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(config: RealtimeConfig) -> Self {
        Self {
            pool: Arc::new(ConnectionPool::new()),
            config,
        }
    }

    /// Registers a new connection for `email`.
    ///
    /// Returns the connection handle and a receiver for outbound frames.
    /// When the user is already at the connection limit, the oldest
    /// connection is closed to make room.
    pub fn register(&self, email: String) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size.max(1));
        let handle = Arc::new(ConnectionHandle::new(email, tx));

        let existing = self.pool.get_user_connections(&handle.email);
        let max = self.config.max_connections_per_user.max(1);
        if existing.len() >= max {
            warn!(
                email = %handle.email,
                count = existing.len(),
                max,
                "User at max connections, oldest will be replaced"
            );
            for oldest in existing.iter().take(existing.len() + 1 - max) {
                oldest.mark_dead();
                self.pool.remove(&oldest.id);
            }
        }

        self.pool.add(handle.clone());

        info!(
            conn_id = %handle.id,
            email = %handle.email,
            "WebSocket connection registered"
        );

        (handle, rx)
    }

    /// Unregisters a connection.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.mark_dead();
            info!(
                conn_id = %conn_id,
                email = %handle.email,
                connected_secs = (Utc::now() - handle.connected_at).num_seconds(),
                "WebSocket connection unregistered"
            );
        }
    }

    /// Processes an inbound text frame from a client.
    pub async fn handle_inbound(&self, conn_id: &ConnectionId, raw_message: &str) {
        let Some(handle) = self.pool.get(conn_id) else {
            warn!(conn_id = %conn_id, "Message from unknown connection");
            return;
        };

        let msg: InboundMessage = match serde_json::from_str(raw_message) {
            Ok(m) => m,
            Err(e) => {
                let error = OutboundMessage::Error {
                    code: "INVALID_MESSAGE".to_string(),
                    message: format!("Failed to parse message: {e}"),
                };
                if let Ok(frame) = error.to_frame() {
                    handle.send(frame);
                }
                return;
            }
        };

        match msg {
            InboundMessage::Pong { .. } => {
                handle.record_pong().await;
            }
            InboundMessage::Ack { notification_id } => {
                debug!(
                    conn_id = %conn_id,
                    notification_id = %notification_id,
                    "Notification acknowledged"
                );
            }
        }
    }

    /// Sends a message to every live connection of `email`.
    ///
    /// Returns the number of connections the frame was queued on.
    pub fn send_to_user(&self, email: &str, message: &OutboundMessage) -> AppResult<usize> {
        let connections = self.pool.get_user_connections(email);
        if connections.is_empty() {
            return Ok(0);
        }

        let frame = message.to_frame()?;
        let sent = connections
            .iter()
            .filter(|conn| conn.send(frame.clone()))
            .count();

        if sent < connections.len() {
            warn!(
                email = %email,
                sent,
                total = connections.len(),
                "Some connections did not accept the frame"
            );
        }
        Ok(sent)
    }

    /// Closes all connections.
    pub fn close_all(&self) {
        let all = self.pool.all_connections();
        for conn in &all {
            conn.mark_dead();
            self.pool.remove(&conn.id);
        }
        info!(count = all.len(), "All connections closed");
    }

    /// Returns the total connection count.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }

    /// Returns the number of unique connected users.
    pub fn user_count(&self) -> usize {
        self.pool.user_count()
    }
}
