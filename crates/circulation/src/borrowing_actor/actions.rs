//! Custom actions for the Borrowing actor.
//!
//! Actions are handled by [`ActorEntity::handle_action`](actor_framework::ActorEntity::handle_action)
//! on [`Borrowing`](crate::model::Borrowing), which delegates to the lifecycle engine.

use chrono::NaiveDate;

/// State transitions on a borrowing.
#[derive(Debug, Clone)]
pub enum BorrowingAction {
    /// Marks the book as returned on `return_date` and charges `fee_per_late_day` for
    /// every day past the due date.
    ///
    /// # Errors
    /// Fails with `InvalidState` unless the borrowing is ACTIVE, and with `InvalidInput`
    /// if `return_date` precedes the borrow date.
    Return {
        return_date: NaiveDate,
        fee_per_late_day: u32,
    },
}
