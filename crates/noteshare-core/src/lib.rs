//! # noteshare-core
//!
//! Core crate for the NoteShare notification service. Contains the
//! configuration schema, typed identifiers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other NoteShare crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
