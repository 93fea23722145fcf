//! Errors surfaced by the clients and the circulation desk.

use crate::engine::LifecycleError;
use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during circulation operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CirculationError {
    /// A lifecycle rule refused the operation.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// The requested borrowing or reservation does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CirculationError {
    /// True for optimistic-lock collisions, the only errors worth retrying.
    pub fn is_conflict(&self) -> bool {
        matches!(self, CirculationError::Lifecycle(LifecycleError::Conflict(_)))
    }
}

impl From<FrameworkError> for CirculationError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::Conflict { .. } => {
                CirculationError::Lifecycle(LifecycleError::Conflict(e.to_string()))
            }
            FrameworkError::NotFound(id) => CirculationError::NotFound(id),
            // Both entities report LifecycleError, so recover it from the box.
            FrameworkError::EntityError(inner) => match inner.downcast::<LifecycleError>() {
                Ok(lifecycle) => CirculationError::Lifecycle(*lifecycle),
                Err(other) => CirculationError::ActorCommunicationError(other.to_string()),
            },
            other => CirculationError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_entity_errors_keep_their_lifecycle_variant() {
        let framework = FrameworkError::EntityError(Box::new(LifecycleError::Reference(
            "member m9 does not exist".to_string(),
        )));

        assert_matches!(
            CirculationError::from(framework),
            CirculationError::Lifecycle(LifecycleError::Reference(msg)) if msg.contains("m9")
        );
    }

    #[test]
    fn test_version_conflicts_become_lifecycle_conflicts() {
        let framework = FrameworkError::Conflict {
            id: "borrowing_1".to_string(),
            expected: 1,
            actual: 2,
        };

        let error = CirculationError::from(framework);

        assert!(error.is_conflict());
        assert!(error.to_string().contains("borrowing_1"));
    }

    #[test]
    fn test_channel_failures_are_communication_errors() {
        assert_matches!(
            CirculationError::from(FrameworkError::ActorClosed),
            CirculationError::ActorCommunicationError(_)
        );
        assert_matches!(
            CirculationError::from(FrameworkError::NotFound("reservation_4".into())),
            CirculationError::NotFound(id) if id == "reservation_4"
        );
    }
}
