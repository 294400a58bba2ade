//! NoteShare Server: share-request notifications with real-time delivery.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use noteshare_api::{AppState, build_app};
use noteshare_core::config::{AppConfig, StoreBackend};
use noteshare_core::error::AppError;
use noteshare_database::{DatabasePool, MemoryNotificationStore, NotificationStore};
use noteshare_service::share::grant::build_access_grant;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("NOTESHARE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting NoteShare");

    // ── Step 1: Notification store ───────────────────────────────
    let mut db_pool = None;
    let store: Arc<dyn NotificationStore> = match config.store.backend {
        StoreBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = DatabasePool::connect(&config.database).await?;
            let repository = pool.notification_store();
            db_pool = Some(pool);
            Arc::new(repository)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory notification store; records are lost on restart");
            Arc::new(MemoryNotificationStore::new())
        }
    };

    // ── Step 2: Access grant collaborator ────────────────────────
    let grant = build_access_grant(&config.grant)?;
    match &config.grant.endpoint {
        Some(endpoint) => tracing::info!(endpoint = %endpoint, "Access grants go to notes service"),
        None => tracing::info!("No grant endpoint configured, access grants are logged only"),
    }

    // ── Step 3: Services, real-time engine, router ───────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(config, store, grant);
    let realtime = state.realtime.clone();
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(addr = %addr, "NoteShare server listening");

    // ── Step 4: Serve until signalled ────────────────────────────
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        realtime.shutdown();
        let _ = stop_tx.send(true);
    });
    let mut server = tokio::spawn(async move { serve.await });

    let outcome = tokio::select! {
        result = &mut server => Some(result),
        _ = async {
            let _ = stop_rx.wait_for(|stopped| *stopped).await;
            tokio::time::sleep(grace).await;
        } => None,
    };

    match outcome {
        Some(Ok(result)) => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        Some(Err(e)) => return Err(AppError::internal(format!("Server task failed: {e}"))),
        None => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Grace period elapsed, aborting open connections");
            server.abort();
        }
    }

    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("NoteShare server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
