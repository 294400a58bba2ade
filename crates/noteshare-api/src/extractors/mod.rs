//! Custom Axum extractors.

pub mod path;
pub mod validated;

pub use path::parse_notification_id;
pub use validated::{ValidatedJson, ValidatedQuery};
