//! Top-level real-time engine that ties together all subsystems.

use std::sync::Arc;

use tracing::info;

use noteshare_core::config::RealtimeConfig;
use noteshare_service::share::delivery::RealtimeChannel;

use crate::connection::heartbeat::HeartbeatConfig;
use crate::connection::manager::ConnectionManager;
use crate::notification::dispatcher::NotificationDispatcher;

/// Central real-time engine that coordinates the WebSocket subsystems.
#[derive(Debug, Clone)]
pub struct RealtimeEngine {
    /// Connection manager.
    pub connections: Arc<ConnectionManager>,
    /// Notification dispatcher.
    pub notifications: Arc<NotificationDispatcher>,
    /// Heartbeat timings applied to every socket.
    pub heartbeat: HeartbeatConfig,
}

impl RealtimeEngine {
    /// Creates a new real-time engine with all subsystems.
    pub fn new(config: RealtimeConfig) -> Self {
        let heartbeat = HeartbeatConfig::from_config(&config);
        let connections = Arc::new(ConnectionManager::new(config));
        let notifications = Arc::new(NotificationDispatcher::new(connections.clone()));

        info!("Real-time engine initialized");

        Self {
            connections,
            notifications,
            heartbeat,
        }
    }

    /// The dispatcher as the channel consumed by the lifecycle service.
    pub fn channel(&self) -> Arc<dyn RealtimeChannel> {
        self.notifications.clone()
    }

    /// Closes every connection; their socket tasks wind down on their own.
    pub fn shutdown(&self) {
        info!(
            connections = self.connections.connection_count(),
            "Shutting down real-time engine"
        );
        self.connections.close_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_closes_connections() {
        let engine = RealtimeEngine::new(RealtimeConfig::default());
        let (handle, _rx) = engine.connections.register("bob@x.com".into());

        engine.shutdown();
        assert!(!handle.is_alive());
        assert_eq!(engine.connections.connection_count(), 0);
    }
}
