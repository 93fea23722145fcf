//! # Library Circulation
//!
//! Borrowing and reservation lifecycles for a library, kept behind actors.
//!
//! - **[engine]**: Pure rules: due dates, late fees and the status transitions.
//! - **[model]**: [`Borrowing`](model::Borrowing), [`Reservation`](model::Reservation) and their
//!   serial numbers (`BR20240001`, `RS20240001`).
//! - **[borrowing_actor]** / **[reservation_actor]**: Bind the engine to
//!   [`ResourceActor`](actor_framework::ResourceActor), which numbers and versions the records.
//! - **[clients]**: Typed clients with optimistic-concurrency retry.
//! - **[lifecycle]**: [`CirculationDesk`](lifecycle::CirculationDesk) orchestration and tracing setup.
//! - **[directory]**: Member and book existence checks.
//! - **[config]**: Loan policy from the environment.

pub mod borrowing_actor;
pub mod clients;
pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod reservation_actor;
