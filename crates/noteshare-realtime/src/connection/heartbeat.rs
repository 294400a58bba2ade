//! Ping/pong heartbeat for WebSocket keepalive.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, Instant};

use noteshare_core::config::RealtimeConfig;

use super::handle::ConnectionHandle;
use crate::message::types::OutboundMessage;

/// Heartbeat configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatConfig {
    /// Interval between pings
    pub ping_interval: Duration,
    /// Silence after which the connection is considered dead
    pub ping_timeout: Duration,
}

impl HeartbeatConfig {
    /// Heartbeat timings from the real-time configuration.
    pub fn from_config(config: &RealtimeConfig) -> Self {
        Self {
            ping_interval: Duration::from_secs(config.ping_interval_seconds.max(1)),
            ping_timeout: Duration::from_secs(config.ping_timeout_seconds.max(1)),
        }
    }
}

/// Run heartbeat loop for a connection.
///
/// Sends periodic pings and marks the connection dead once no pong has
/// arrived within the timeout. Returns when the connection is dead.
pub async fn run_heartbeat(handle: Arc<ConnectionHandle>, config: HeartbeatConfig) {
    let mut interval = time::interval_at(Instant::now() + config.ping_interval, config.ping_interval);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = handle.closed() => break,
        }

        let silent_for = Instant::now().saturating_duration_since(handle.last_pong().await);
        if silent_for > config.ping_timeout {
            tracing::warn!(
                conn_id = %handle.id,
                email = %handle.email,
                silent_ms = silent_for.as_millis() as u64,
                "Connection heartbeat timeout"
            );
            handle.mark_dead();
            break;
        }

        let frame = match OutboundMessage::ping().to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize ping");
                continue;
            }
        };

        if !handle.send(frame) && !handle.is_alive() {
            tracing::debug!(conn_id = %handle.id, "Ping send failed, connection closed");
            break;
        }
    }

    tracing::debug!(conn_id = %handle.id, "Heartbeat loop ended");
}
