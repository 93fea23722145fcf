//! # Lifecycle Engine
//!
//! Pure circulation rules. Every function takes the current record by reference and
//! returns the next one, so a refused transition leaves nothing half-applied.
//!
//! Numbering is not decided here: the caller hands in the sequence allocated for the
//! record's (type, year) and the engine turns it into a [`SerialNumber`](crate::model::SerialNumber).
//! The store actors do that allocation; see [`crate::borrowing_actor`].
//!
//! ```rust
//! use chrono::NaiveDate;
//! use circulation::engine;
//! use circulation::model::{BorrowingId, NewBorrowing};
//!
//! let borrow_date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//! let borrowing = engine::create_borrowing(
//!     BorrowingId(1),
//!     1,
//!     NewBorrowing {
//!         member_id: "m1".into(),
//!         book_id: "b1".into(),
//!         borrow_date,
//!         loan_period_days: 14,
//!     },
//! )
//! .unwrap();
//! assert_eq!(borrowing.due_date(), NaiveDate::from_ymd_opt(2024, 1, 24).unwrap());
//!
//! let returned = engine::return_borrowing(
//!     &borrowing,
//!     NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
//!     5,
//! )
//! .unwrap();
//! assert_eq!(returned.late_fee(), 40);
//! ```

pub mod borrowing;
pub mod error;
pub mod reservation;

pub use borrowing::{create_borrowing, due_date, late_fee, return_borrowing};
pub use error::LifecycleError;
pub use reservation::{cancel_reservation, create_reservation, fulfill_reservation};
