//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`, defaulting to `info`.
//!
//! ```bash
//! RUST_LOG=info cargo run      # Lifecycle events only
//! RUST_LOG=debug cargo run     # Full payloads and every Get/List
//! ```
//!
//! With `RUST_LOG=info`, checking a book out and returning it late looks like:
//!
//! ```text
//! INFO Actor started entity_type="Borrowing"
//! INFO create_borrowing: Created entity_type="Borrowing" id=borrowing_1 scope=2024 sequence=1 size=1
//! INFO create_borrowing: Borrowing created number=BR20240001
//! INFO return_borrowing: Action ok entity_type="Borrowing" id=borrowing_1 version=2
//! INFO return_borrowing: Borrowing returned number=BR20240001 late_fee=40
//! ```
//!
//! Stale versions show up as `WARN Stale version` from the actor followed by
//! `WARN Conflict, retrying` from the client.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type identifies the actor
        .compact()
        .init();
}
