//! # Framework Errors
//!
//! This module defines the common error types used throughout the actor framework.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The caller acted on a stale copy of the record.
    #[error("Version conflict on {id}: expected {expected}, found {actual}")]
    Conflict {
        id: String,
        expected: u64,
        actual: u64,
    },
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Returns `true` for optimistic-lock collisions, which callers may retry.
    pub fn is_conflict(&self) -> bool {
        matches!(self, FrameworkError::Conflict { .. })
    }
}
