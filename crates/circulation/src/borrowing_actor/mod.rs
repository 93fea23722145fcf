//! # Borrowing Actor
//!
//! Keeps every [`Borrowing`] behind a [`ResourceActor`], which numbers new borrowings and
//! serializes their returns.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Borrowing`]
//! - [`actions`] - [`BorrowingAction`] for the return transition
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use circulation::borrowing_actor;
//! use circulation::clients::BorrowingClient;
//! use circulation::directory::InMemoryDirectory;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = borrowing_actor::new(32);
//!     let client = BorrowingClient::new(generic_client);
//!
//!     // The directory is the actor's context
//!     let directory = Arc::new(InMemoryDirectory::with_entries(["m1"], ["b1"]));
//!     tokio::spawn(actor.run(directory));
//!
//!     let borrow_date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//!     let borrowing = client.create_borrowing("m1", "b1", borrow_date, 14).await?;
//!     assert_eq!(borrowing.number().to_string(), "BR20240001");
//!
//!     let returned = client
//!         .return_borrowing(borrowing.id(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(), 5)
//!         .await?;
//!     assert_eq!(returned.late_fee(), 40);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;

pub use actions::*;

use crate::model::Borrowing;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Borrowing actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Borrowing>, ResourceClient<Borrowing>) {
    ResourceActor::new(buffer_size)
}
