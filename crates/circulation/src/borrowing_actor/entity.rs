//! [`ActorEntity`] implementation for [`Borrowing`].
//!
//! Borrowing numbers are sequenced per calendar year of the borrow date. Member and book
//! references are checked against the injected [`Directory`](crate::directory::Directory)
//! before the record is stored.

use super::actions::BorrowingAction;
use crate::directory::{verify_references, SharedDirectory};
use crate::engine::{self, LifecycleError};
use crate::model::{Borrowing, BorrowingId, BorrowingQuery, NewBorrowing};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Datelike;

#[async_trait]
impl ActorEntity for Borrowing {
    type Id = BorrowingId;
    type Create = NewBorrowing;
    type Action = BorrowingAction;
    type Query = BorrowingQuery;
    type Scope = i32;
    type Context = SharedDirectory;
    type Error = LifecycleError;

    fn sequence_scope(params: &NewBorrowing) -> i32 {
        params.borrow_date.year()
    }

    fn from_create_params(
        id: BorrowingId,
        sequence: u32,
        params: NewBorrowing,
    ) -> Result<Self, LifecycleError> {
        engine::create_borrowing(id, sequence, params)
    }

    /// Refuses borrowings for unknown members or books.
    async fn on_create(&mut self, directory: &SharedDirectory) -> Result<(), LifecycleError> {
        verify_references(directory.as_ref(), &self.member_id, &self.book_id).await
    }

    async fn handle_action(
        &mut self,
        action: BorrowingAction,
        _directory: &SharedDirectory,
    ) -> Result<(), LifecycleError> {
        match action {
            BorrowingAction::Return {
                return_date,
                fee_per_late_day,
            } => {
                *self = engine::return_borrowing(self, return_date, fee_per_late_day)?;
                Ok(())
            }
        }
    }

    fn matches(&self, query: &BorrowingQuery) -> bool {
        query.matches(self)
    }
}
