//! Delivery of notification records to live connections.

pub mod dispatcher;

pub use dispatcher::NotificationDispatcher;
