//! Borrowing rules: due dates, late fees and the return transition.

use crate::engine::LifecycleError;
use crate::model::{Borrowing, BorrowingId, BorrowingState, NewBorrowing, NumberKind, SerialNumber};
use chrono::{Datelike, Days, NaiveDate};

/// `borrow_date + loan_period_days`, refusing non-positive periods and calendar overflow.
pub fn due_date(borrow_date: NaiveDate, loan_period_days: i64) -> Result<NaiveDate, LifecycleError> {
    if loan_period_days <= 0 {
        return Err(LifecycleError::invalid_input(format!(
            "loan period must be positive, got {loan_period_days} days"
        )));
    }
    let days = Days::new(loan_period_days.unsigned_abs());
    borrow_date.checked_add_days(days).ok_or_else(|| {
        LifecycleError::invalid_input(format!(
            "due date for {borrow_date} plus {loan_period_days} days is out of range"
        ))
    })
}

/// Fee for returning on `return_date` a book due on `due_date`. Early and on-time returns
/// cost nothing.
pub fn late_fee(due_date: NaiveDate, return_date: NaiveDate, fee_per_late_day: u32) -> u64 {
    let late_days = (return_date - due_date).num_days().max(0);
    // `late_days` is non-negative here.
    (late_days as u64).saturating_mul(u64::from(fee_per_late_day))
}

/// Builds a new ACTIVE borrowing numbered `sequence` within the year of its borrow date.
pub fn create_borrowing(
    id: BorrowingId,
    sequence: u32,
    params: NewBorrowing,
) -> Result<Borrowing, LifecycleError> {
    if params.member_id.is_blank() {
        return Err(LifecycleError::invalid_input("member id must not be blank"));
    }
    if params.book_id.is_blank() {
        return Err(LifecycleError::invalid_input("book id must not be blank"));
    }
    let due_date = due_date(params.borrow_date, params.loan_period_days)?;
    let number = SerialNumber::new(NumberKind::Borrowing, params.borrow_date.year(), sequence)?;

    Ok(Borrowing {
        id,
        borrowing_number: number,
        member_id: params.member_id,
        book_id: params.book_id,
        borrow_date: params.borrow_date,
        due_date,
        state: BorrowingState::Active,
    })
}

/// Returns the book, computing the late fee. Only ACTIVE borrowings can be returned.
pub fn return_borrowing(
    borrowing: &Borrowing,
    return_date: NaiveDate,
    fee_per_late_day: u32,
) -> Result<Borrowing, LifecycleError> {
    if borrowing.state != BorrowingState::Active {
        return Err(LifecycleError::invalid_state(
            "borrowing",
            "return",
            borrowing.status(),
        ));
    }
    if return_date < borrowing.borrow_date {
        return Err(LifecycleError::invalid_input(format!(
            "return date {return_date} is before borrow date {}",
            borrowing.borrow_date
        )));
    }

    Ok(Borrowing {
        state: BorrowingState::Returned {
            return_date,
            late_fee: late_fee(borrowing.due_date, return_date, fee_per_late_day),
        },
        ..borrowing.clone()
    })
}
