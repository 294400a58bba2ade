//! Share-request lifecycle and its collaborators.

pub mod delivery;
pub mod grant;
pub mod lifecycle;

pub use delivery::{PushOutcome, RealtimeChannel};
pub use grant::{AccessGrant, HttpAccessGrant, NoopAccessGrant};
pub use lifecycle::{GrantRetryPolicy, ShareLifecycleService, ShareResponse};
