//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract that every stored record (Borrowing,
//! Reservation, …) must implement to be managed by the generic `ResourceActor`. It specifies
//! associated types for IDs, creation payloads, state transitions, list queries, sequence
//! scopes, context and errors, and provides lifecycle hooks (`on_create`, `on_delete`,
//! `handle_action`).
//!
//! # Architecture Note
//! By defining a contract (`ActorEntity`) that every record type must satisfy, we write the
//! `ResourceActor` logic *once* and reuse it for each document collection.
//!
//! We use "Associated Types" (type Id, type Create, etc.) to enforce type safety.
//! A `Borrowing` entity requires a `NewBorrowing` payload, and you can't accidentally send it
//! a `NewReservation` payload. The compiler prevents this class of bugs entirely.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! The default implementation does nothing (`Ok(())`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record type must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` to allow asynchronous operations in hooks (e.g., asking an
/// external directory whether a referenced member exists). The `Context` type is injected
/// into every hook at `run()` time rather than at construction time.
///
/// # Sequence Numbers
/// Each record receives a human-readable sequence number at creation. The actor keeps one
/// counter per [`ActorEntity::Scope`] (for example, one per calendar year) and hands the
/// next value to [`ActorEntity::from_create_params`]. The counter only advances when the
/// record is actually stored.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Enum representing the state transitions this record supports.
    type Action: Send + Sync + Debug;

    /// Filter used by list requests.
    type Query: Send + Sync + Debug;

    /// Partition key for sequence numbering (e.g. the calendar year).
    type Scope: Eq + Hash + Clone + Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// # Design Note: Error Granularity
    ///
    /// The framework enforces a **Per-Actor Error Type** (one enum for the whole actor) rather
    /// than **Per-Message Error Types**. Clients deal with a single error type, which keeps
    /// pattern matching simple at the call site.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Selects the counter partition a creation request draws its sequence number from.
    fn sequence_scope(params: &Self::Create) -> Self::Scope;

    /// Construct the full Entity from the ID, the allocated sequence number and the payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(
        id: Self::Id,
        sequence: u32,
        params: Self::Create,
    ) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    /// Use this hook to perform validation against external collaborators.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Apply a state transition.
    ///
    /// The actor calls this on a copy of the stored entity and only commits the copy when
    /// the call succeeds, so an `Err` never leaves a half-applied change behind.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Returns whether this entity belongs in the result of a list request.
    fn matches(&self, query: &Self::Query) -> bool;
}
