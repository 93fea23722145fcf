//! Error types for the lifecycle engine.

use thiserror::Error;

/// Why a lifecycle operation was refused.
///
/// Every variant means the operation had no effect: records are only replaced after all
/// checks pass.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// The caller supplied out-of-range or inconsistent values.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The requested transition is not allowed from the record's current status.
    #[error("Cannot {operation} {entity} in status {status}")]
    InvalidState {
        entity: &'static str,
        operation: &'static str,
        status: String,
    },

    /// A referenced member or book does not exist.
    #[error("Reference error: {0}")]
    Reference(String),

    /// A concurrent change collided with this one; the caller may retry.
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl LifecycleError {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        LifecycleError::InvalidInput(msg.into())
    }

    pub(crate) fn invalid_state(
        entity: &'static str,
        operation: &'static str,
        status: impl ToString,
    ) -> Self {
        LifecycleError::InvalidState {
            entity,
            operation,
            status: status.to_string(),
        }
    }
}
