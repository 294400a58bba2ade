//! # noteshare-realtime
//!
//! Real-time WebSocket engine for NoteShare. Provides:
//!
//! - Per-user connection tracking with a bounded number of sockets per user
//! - Fan-out of notification records to every live socket of an identity
//! - Ping/pong heartbeat that retires silent connections
//!
//! The engine is transport-agnostic: sockets are represented by bounded
//! channels of serialized frames, and the HTTP layer pumps those frames to
//! the actual WebSocket.

pub mod connection;
pub mod message;
pub mod notification;
pub mod server;

pub use connection::manager::ConnectionManager;
pub use notification::dispatcher::NotificationDispatcher;
pub use server::RealtimeEngine;
