//! Convenience result type alias for NoteShare.

use crate::error::AppError;

/// A specialized `Result` type for NoteShare operations.
pub type AppResult<T> = Result<T, AppError>;
