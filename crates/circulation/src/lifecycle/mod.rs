//! # Circulation Lifecycle & Orchestration
//!
//! [`CirculationDesk`] starts the Borrowing and Reservation actors, injects the member/book
//! directory into both, and combines their clients into the desk's workflows:
//!
//! - **check out / return** with the configured [`LoanPolicy`](crate::config::LoanPolicy)
//! - **reservation handoff**: a returned book is matched to the earliest pending
//!   reservation, and [`CirculationDesk::claim_reservation`] turns that reservation into a
//!   borrowing
//! - **graceful shutdown**: drop the clients, then await the actor tasks
//!
//! ## Context Injection
//!
//! Both entities declare `type Context = SharedDirectory`. The directory is passed to
//! `run()` when the actors are spawned, so the actors themselves are created without
//! dependencies.
//!
//! See [`self::tracing`] for the logging setup.

pub mod circulation_desk;
pub mod tracing;

pub use circulation_desk::*;
pub use self::tracing::*;
