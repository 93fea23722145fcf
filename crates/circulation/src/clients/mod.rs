//! Typed clients for the store actors.
//!
//! Each client wraps a [`ResourceClient`](actor_framework::ResourceClient) and implements
//! [`ActorClient`](actor_framework::ActorClient), which supplies `get`, `list` and `delete`.
//! Errors from the actors are translated into [`CirculationError`](crate::error::CirculationError).

pub mod borrowing_client;
pub mod reservation_client;
pub mod retry;

pub use borrowing_client::BorrowingClient;
pub use reservation_client::ReservationClient;
pub use retry::{with_conflict_retry, MAX_CONFLICT_ATTEMPTS};
