//! Core type definitions used across the NoteShare workspace.

pub mod id;

pub use id::*;
