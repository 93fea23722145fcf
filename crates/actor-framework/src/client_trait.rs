//! # ActorClient Trait
//!
//! Provides a common interface for record-specific clients, adding default `get`, `list`
//! and `delete` methods built on top of a generic `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for record-specific clients to inherit the standard read and delete operations.
///
/// Implementors supply the inner [`ResourceClient`] and a mapping from
/// [`FrameworkError`] into their own error type; the defaults unwrap the
/// [`Record`](crate::Record) envelope and return the bare entity.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The record-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .get(id)
            .await
            .map(|record| record.map(|r| r.entity))
            .map_err(Self::map_error)
    }

    /// Fetch every entity matching `query`, in no particular order.
    #[tracing::instrument(skip(self))]
    async fn list(&self, query: T::Query) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .list(query)
            .await
            .map(|records| records.into_iter().map(|r| r.entity).collect())
            .map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
