//! # Reservation Actor
//!
//! Keeps every [`Reservation`] behind a [`ResourceActor`]. Reservation numbers are
//! sequenced per calendar year of the reservation date, independently of borrowings.
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Reservation`]
//! - [`actions`] - [`ReservationAction`] (fulfill, cancel)

pub mod actions;
pub mod entity;

pub use actions::*;

use crate::model::Reservation;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Reservation actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Reservation>, ResourceClient<Reservation>) {
    ResourceActor::new(buffer_size)
}
