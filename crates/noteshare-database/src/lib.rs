//! # noteshare-database
//!
//! Persistence for notification records: the [`NotificationStore`] trait
//! consumed by the service layer, a PostgreSQL implementation backed by
//! sqlx, and a process-local implementation for single-node runs and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryNotificationStore;
pub use repositories::NotificationRepository;
pub use store::NotificationStore;
