//! # noteshare-entity
//!
//! Domain entity models for NoteShare. [`Notification`] represents a row
//! of the `notifications` table; the enums in [`notification`] encode the
//! share-request state machine.

pub mod notification;

pub use notification::{
    NewNotification, Notification, NotificationStatus, NotificationType, ShareDecision,
};
