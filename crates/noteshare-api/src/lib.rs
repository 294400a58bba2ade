//! # noteshare-api
//!
//! HTTP API layer for NoteShare built on Axum.
//!
//! Provides the notification REST endpoints, the WebSocket upgrade,
//! middleware (CORS, request logging), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
