use crate::engine::LifecycleError;
use crate::model::{BookId, MemberId, NumberKind, ReservationId, SerialNumber};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Reservation lifecycle. `Received` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Received,
    Cancelled,
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservationStatus::Pending => f.write_str("PENDING"),
            ReservationStatus::Received => f.write_str("RECEIVED"),
            ReservationStatus::Cancelled => f.write_str("CANCELLED"),
        }
    }
}

/// A member's request for a book that is currently out.
///
/// Deserialized through [`ReservationDocument`], which checks the number against the date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ReservationDocument")]
pub struct Reservation {
    pub(crate) id: ReservationId,
    pub(crate) reservation_number: SerialNumber,
    pub(crate) member_id: MemberId,
    pub(crate) book_id: BookId,
    pub(crate) reservation_date: NaiveDate,
    pub(crate) status: ReservationStatus,
}

impl Reservation {
    pub fn id(&self) -> ReservationId {
        self.id
    }

    pub fn number(&self) -> SerialNumber {
        self.reservation_number
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn book_id(&self) -> &BookId {
        &self.book_id
    }

    pub fn reservation_date(&self) -> NaiveDate {
        self.reservation_date
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == ReservationStatus::Pending
    }
}

/// Document layout of a reservation in the `reservations` collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDocument {
    pub id: ReservationId,
    pub reservation_number: SerialNumber,
    pub member_id: MemberId,
    pub book_id: BookId,
    pub reservation_date: NaiveDate,
    pub status: ReservationStatus,
}

impl TryFrom<ReservationDocument> for Reservation {
    type Error = LifecycleError;

    fn try_from(doc: ReservationDocument) -> Result<Self, Self::Error> {
        let number = doc.reservation_number;
        if number.kind() != NumberKind::Reservation {
            return Err(LifecycleError::InvalidInput(format!(
                "{number} is not a reservation number"
            )));
        }
        if number.year() != doc.reservation_date.year() {
            return Err(LifecycleError::InvalidInput(format!(
                "reservation {number}: number year does not match reservation date {}",
                doc.reservation_date
            )));
        }
        Ok(Self {
            id: doc.id,
            reservation_number: number,
            member_id: doc.member_id,
            book_id: doc.book_id,
            reservation_date: doc.reservation_date,
            status: doc.status,
        })
    }
}

/// Payload for creating a new reservation.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub member_id: MemberId,
    pub book_id: BookId,
    pub reservation_date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct ReservationQuery {
    pub member_id: Option<MemberId>,
    pub book_id: Option<BookId>,
    pub status: Option<ReservationStatus>,
}

impl ReservationQuery {
    pub fn for_member(member_id: impl Into<MemberId>) -> Self {
        Self {
            member_id: Some(member_id.into()),
            ..Self::default()
        }
    }

    /// Pending reservations waiting for `book_id`.
    pub fn pending_for_book(book_id: impl Into<BookId>) -> Self {
        Self {
            book_id: Some(book_id.into()),
            status: Some(ReservationStatus::Pending),
            ..Self::default()
        }
    }

    pub fn matches(&self, reservation: &Reservation) -> bool {
        self.member_id
            .as_ref()
            .map_or(true, |m| &reservation.member_id == m)
            && self
                .book_id
                .as_ref()
                .map_or(true, |b| &reservation.book_id == b)
            && self.status.map_or(true, |s| reservation.status == s)
    }
}
