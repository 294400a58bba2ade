//! Read side of the notification history.

pub mod service;

pub use service::NotificationQueryService;
