//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::record::Record;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// # Resource-Oriented Architecture
/// Each actor manages one collection of records (the [`ActorEntity`]). Instead of ad-hoc
/// messages for every operation, requests are standardized around the lifecycle of a stored
/// document:
///
/// - **Create**: Allocates an ID and a scoped sequence number, then stores the new record.
/// - **Get**: Fetches the current record (entity + version) by ID.
/// - **List**: Returns every record matching an [`ActorEntity::Query`].
/// - **Action**: Applies an [`ActorEntity::Action`] transition, optionally guarded by the
///   version the caller last saw.
/// - **Delete**: Removes the record.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<Record<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<Record<T>>>,
    },
    List {
        query: T::Query,
        respond_to: Response<Vec<Record<T>>>,
    },
    Action {
        id: T::Id,
        expected_version: Option<u64>,
        action: T::Action,
        respond_to: Response<Record<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
