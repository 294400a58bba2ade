//! # noteshare-service
//!
//! Business logic for NoteShare. [`ShareLifecycleService`] owns the
//! share-request state machine; [`NotificationQueryService`] serves the
//! read side.
//!
//! Services follow constructor injection: the notification store, the
//! real-time channel, and the access grant are all provided as trait
//! objects at construction time.

pub mod identity;
pub mod notification;
pub mod share;

pub use notification::NotificationQueryService;
pub use share::{
    AccessGrant, GrantRetryPolicy, PushOutcome, RealtimeChannel, ShareLifecycleService,
    ShareResponse,
};
