//! # Actor Framework
//!
//! This crate provides the building blocks for keeping collections of versioned records
//! behind actors. It implements a **Resource-Oriented Architecture (ROA)** pattern on top of
//! the **Actor Model**: every record type gets one actor that owns its documents, their
//! versions and the sequence counters used to number them.
//!
//! ## Why ROA + Actor Model?
//!
//! - **Uniform lifecycle**: Create, Get, List, Action and Delete work the same for every
//!   record type.
//! - **Isolated state**: no shared memory and no locks; each actor handles one message at
//!   a time, which also makes sequence allocation atomic.
//! - **Optimistic concurrency**: actions can carry the version the caller last read and are
//!   refused with [`FrameworkError::Conflict`] when the record has moved on.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Your business rules and domain models
//! 2. **Runtime Layer** ([`ResourceActor`]) - Message processing, versioning, numbering
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - Type-safe communication
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Invoice {
//!     id: u32,
//!     number: u32,
//!     paid: bool,
//! }
//!
//! #[derive(Debug)] struct InvoiceCreate { year: i32 }
//! #[derive(Debug)] enum InvoiceAction { Pay }
//! #[derive(Debug, thiserror::Error)]
//! #[error("already paid")]
//! struct AlreadyPaid;
//!
//! #[async_trait]
//! impl ActorEntity for Invoice {
//!     type Id = u32;
//!     type Create = InvoiceCreate;
//!     type Action = InvoiceAction;
//!     type Query = ();
//!     type Scope = i32;
//!     type Context = ();
//!     type Error = AlreadyPaid;
//!
//!     fn sequence_scope(params: &InvoiceCreate) -> i32 { params.year }
//!
//!     fn from_create_params(id: u32, sequence: u32, _: InvoiceCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, number: sequence, paid: false })
//!     }
//!
//!     async fn handle_action(&mut self, _: InvoiceAction, _: &()) -> Result<(), Self::Error> {
//!         if self.paid { return Err(AlreadyPaid); }
//!         self.paid = true;
//!         Ok(())
//!     }
//!
//!     fn matches(&self, _: &()) -> bool { true }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Invoice>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let first = client.create(InvoiceCreate { year: 2024 }).await.unwrap();
//!     let second = client.create(InvoiceCreate { year: 2024 }).await.unwrap();
//!     assert_eq!((first.entity.number, second.entity.number), (1, 2));
//!
//!     let paid = client.perform_action(first.entity.id, Some(first.version), InvoiceAction::Pay).await.unwrap();
//!     assert_eq!(paid.version, 2);
//!
//!     // Acting on the stale version is refused.
//!     let stale = client.perform_action(first.entity.id, Some(first.version), InvoiceAction::Pay).await;
//!     assert!(stale.unwrap_err().is_conflict());
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via the `run()` method, not at construction time.
//! An entity whose creation must be checked against an external service declares that
//! service as its `Context` and uses it in `on_create`.
//!
//! ## Testing
//!
//! The [`mock`] module provides `MockClient`, which answers a real `ResourceClient<T>` from a
//! queue of expectations so client logic can be tested without spawning actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;
pub mod sequence;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use record::Record;
pub use sequence::SequenceCounter;
