//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use noteshare_core::config::AppConfig;
use noteshare_database::store::NotificationStore;
use noteshare_realtime::server::RealtimeEngine;
use noteshare_service::notification::service::NotificationQueryService;
use noteshare_service::share::grant::AccessGrant;
use noteshare_service::share::lifecycle::{GrantRetryPolicy, ShareLifecycleService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Share-request state machine
    pub lifecycle: Arc<ShareLifecycleService>,
    /// Notification history queries
    pub queries: Arc<NotificationQueryService>,
    /// WebSocket engine
    pub realtime: RealtimeEngine,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Wire the services around a store and an access grant.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn NotificationStore>,
        grant: Arc<dyn AccessGrant>,
    ) -> Self {
        let realtime = RealtimeEngine::new(config.realtime.clone());
        let lifecycle = Arc::new(ShareLifecycleService::new(
            Arc::clone(&store),
            realtime.channel(),
            grant,
            GrantRetryPolicy::from_config(&config.grant),
        ));
        let queries = Arc::new(NotificationQueryService::new(store));

        Self {
            config: Arc::new(config),
            lifecycle,
            queries,
            realtime,
            started_at: Instant::now(),
        }
    }
}
