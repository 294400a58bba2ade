//! Notification domain entities.

pub mod decision;
pub mod kind;
pub mod model;
pub mod status;

pub use decision::ShareDecision;
pub use kind::NotificationType;
pub use model::{NewNotification, Notification};
pub use status::NotificationStatus;
