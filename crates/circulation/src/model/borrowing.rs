//! A book checked out by a member for a bounded period.
//!
//! [`Borrowing`] implements [`ActorEntity`](actor_framework::ActorEntity) in
//! [`crate::borrowing_actor`], which also defines its actions.

use crate::engine::LifecycleError;
use crate::model::{BookId, BorrowingId, MemberId, NumberKind, SerialNumber};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Where a borrowing is in its lifecycle.
///
/// The return date and the late fee only exist once the book is back, so an active
/// borrowing cannot carry either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowingState {
    Active,
    Returned { return_date: NaiveDate, late_fee: u64 },
}

/// Fieldless view of [`BorrowingState`], used for filtering and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BorrowingStatus {
    Active,
    Returned,
}

impl Display for BorrowingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BorrowingStatus::Active => f.write_str("ACTIVE"),
            BorrowingStatus::Returned => f.write_str("RETURNED"),
        }
    }
}

/// Stored as a [`BorrowingDocument`]; reading one back re-checks every record invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BorrowingDocument", try_from = "BorrowingDocument")]
pub struct Borrowing {
    pub(crate) id: BorrowingId,
    pub(crate) borrowing_number: SerialNumber,
    pub(crate) member_id: MemberId,
    pub(crate) book_id: BookId,
    pub(crate) borrow_date: NaiveDate,
    pub(crate) due_date: NaiveDate,
    pub(crate) state: BorrowingState,
}

impl Borrowing {
    pub fn id(&self) -> BorrowingId {
        self.id
    }

    pub fn number(&self) -> SerialNumber {
        self.borrowing_number
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn book_id(&self) -> &BookId {
        &self.book_id
    }

    pub fn borrow_date(&self) -> NaiveDate {
        self.borrow_date
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn state(&self) -> BorrowingState {
        self.state
    }

    pub fn status(&self) -> BorrowingStatus {
        match self.state {
            BorrowingState::Active => BorrowingStatus::Active,
            BorrowingState::Returned { .. } => BorrowingStatus::Returned,
        }
    }

    /// `None` while the book is still out.
    pub fn return_date(&self) -> Option<NaiveDate> {
        match self.state {
            BorrowingState::Active => None,
            BorrowingState::Returned { return_date, .. } => Some(return_date),
        }
    }

    /// Zero until the borrowing is returned.
    pub fn late_fee(&self) -> u64 {
        match self.state {
            BorrowingState::Active => 0,
            BorrowingState::Returned { late_fee, .. } => late_fee,
        }
    }

    /// True when the book is still out and `on` is past the due date.
    pub fn is_overdue(&self, on: NaiveDate) -> bool {
        self.state == BorrowingState::Active && self.due_date < on
    }
}

/// Flat document layout of a borrowing in the `borrowings` collection.
///
/// `lateFee` is always written (zero while ACTIVE); `returnDate` only once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingDocument {
    pub id: BorrowingId,
    pub borrowing_number: SerialNumber,
    pub member_id: MemberId,
    pub book_id: BookId,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: BorrowingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub late_fee: u64,
}

impl From<Borrowing> for BorrowingDocument {
    fn from(borrowing: Borrowing) -> Self {
        Self {
            id: borrowing.id,
            borrowing_number: borrowing.borrowing_number,
            status: borrowing.status(),
            return_date: borrowing.return_date(),
            late_fee: borrowing.late_fee(),
            member_id: borrowing.member_id,
            book_id: borrowing.book_id,
            borrow_date: borrowing.borrow_date,
            due_date: borrowing.due_date,
        }
    }
}

impl TryFrom<BorrowingDocument> for Borrowing {
    type Error = LifecycleError;

    fn try_from(doc: BorrowingDocument) -> Result<Self, Self::Error> {
        let invalid = |msg: String| {
            LifecycleError::InvalidInput(format!("borrowing {}: {msg}", doc.borrowing_number))
        };

        if doc.borrowing_number.kind() != NumberKind::Borrowing {
            return Err(invalid("not a borrowing number".to_string()));
        }
        if doc.borrowing_number.year() != doc.borrow_date.year() {
            return Err(invalid(format!(
                "number year does not match borrow date {}",
                doc.borrow_date
            )));
        }
        if doc.due_date <= doc.borrow_date {
            return Err(invalid(format!(
                "due date {} is not after borrow date {}",
                doc.due_date, doc.borrow_date
            )));
        }
        let state = match (doc.status, doc.return_date) {
            (BorrowingStatus::Active, None) if doc.late_fee == 0 => BorrowingState::Active,
            (BorrowingStatus::Active, _) => {
                return Err(invalid(
                    "an ACTIVE borrowing has no return date and no late fee".to_string(),
                ))
            }
            (BorrowingStatus::Returned, Some(return_date)) if return_date >= doc.borrow_date => {
                BorrowingState::Returned {
                    return_date,
                    late_fee: doc.late_fee,
                }
            }
            (BorrowingStatus::Returned, _) => {
                return Err(invalid(
                    "a RETURNED borrowing needs a return date on or after the borrow date"
                        .to_string(),
                ))
            }
        };

        Ok(Self {
            id: doc.id,
            borrowing_number: doc.borrowing_number,
            member_id: doc.member_id,
            book_id: doc.book_id,
            borrow_date: doc.borrow_date,
            due_date: doc.due_date,
            state,
        })
    }
}

/// Payload for creating a new borrowing.
#[derive(Debug, Clone)]
pub struct NewBorrowing {
    pub member_id: MemberId,
    pub book_id: BookId,
    pub borrow_date: NaiveDate,
    pub loan_period_days: i64,
}

/// Filter for listing borrowings. Unset fields match everything; set fields are AND-ed.
#[derive(Debug, Clone, Default)]
pub struct BorrowingQuery {
    pub member_id: Option<MemberId>,
    pub book_id: Option<BookId>,
    pub status: Option<BorrowingStatus>,
    /// Only borrowings that are overdue on this date.
    pub overdue_on: Option<NaiveDate>,
}

impl BorrowingQuery {
    pub fn for_member(member_id: impl Into<MemberId>) -> Self {
        Self {
            member_id: Some(member_id.into()),
            ..Self::default()
        }
    }

    pub fn for_book(book_id: impl Into<BookId>) -> Self {
        Self {
            book_id: Some(book_id.into()),
            ..Self::default()
        }
    }

    pub fn overdue_on(date: NaiveDate) -> Self {
        Self {
            overdue_on: Some(date),
            ..Self::default()
        }
    }

    pub fn matches(&self, borrowing: &Borrowing) -> bool {
        self.member_id
            .as_ref()
            .map_or(true, |m| &borrowing.member_id == m)
            && self
                .book_id
                .as_ref()
                .map_or(true, |b| &borrowing.book_id == b)
            && self.status.map_or(true, |s| borrowing.status() == s)
            && self.overdue_on.map_or(true, |d| borrowing.is_overdue(d))
    }
}
