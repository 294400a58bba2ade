//! Individual WebSocket connection handle.

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, mpsc, watch};
use tokio::time::Instant;

use noteshare_core::types::id::ConnectionId;

/// A handle to a single WebSocket connection.
///
/// Holds the sender for pushing serialized frames to the client plus the
/// identity the socket was opened for.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Normalized email of the connected user
    pub email: String,
    /// Sender for outbound frames
    sender: mpsc::Sender<String>,
    /// When the connection was established
    pub connected_at: DateTime<Utc>,
    /// Last pong (or registration) instant
    last_pong: RwLock<Instant>,
    /// Liveness flag; flips to `false` exactly once
    alive: watch::Sender<bool>,
}

impl ConnectionHandle {
    /// Create a new connection handle
    pub fn new(email: String, sender: mpsc::Sender<String>) -> Self {
        Self {
            id: ConnectionId::new(),
            email,
            sender,
            connected_at: Utc::now(),
            last_pong: RwLock::new(Instant::now()),
            alive: watch::Sender::new(true),
        }
    }

    /// Queue a frame for this connection.
    ///
    /// Returns `false` when the connection is dead or its buffer is full.
    pub fn send(&self, frame: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Connection send buffer full, dropping frame");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Check if connection is alive
    pub fn is_alive(&self) -> bool {
        *self.alive.borrow()
    }

    /// Mark connection as dead
    pub fn mark_dead(&self) {
        self.alive.send_replace(false);
    }

    /// Resolves once the connection has been marked dead.
    pub async fn closed(&self) {
        let mut rx = self.alive.subscribe();
        let _ = rx.wait_for(|alive| !*alive).await;
    }

    /// Record a pong response
    pub async fn record_pong(&self) {
        *self.last_pong.write().await = Instant::now();
    }

    /// Instant of the last pong
    pub async fn last_pong(&self) -> Instant {
        *self.last_pong.read().await
    }
}
