//! Repository implementations backed by PostgreSQL.

pub mod notification;

pub use notification::NotificationRepository;
