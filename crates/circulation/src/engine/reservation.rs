//! Reservation rules. Only PENDING reservations move, and only once.

use crate::engine::LifecycleError;
use crate::model::{NewReservation, NumberKind, Reservation, ReservationId, ReservationStatus, SerialNumber};
use chrono::Datelike;

/// Builds a new PENDING reservation numbered `sequence` within the year of its date.
pub fn create_reservation(
    id: ReservationId,
    sequence: u32,
    params: NewReservation,
) -> Result<Reservation, LifecycleError> {
    if params.member_id.is_blank() {
        return Err(LifecycleError::invalid_input("member id must not be blank"));
    }
    if params.book_id.is_blank() {
        return Err(LifecycleError::invalid_input("book id must not be blank"));
    }
    let number = SerialNumber::new(
        NumberKind::Reservation,
        params.reservation_date.year(),
        sequence,
    )?;

    Ok(Reservation {
        id,
        reservation_number: number,
        member_id: params.member_id,
        book_id: params.book_id,
        reservation_date: params.reservation_date,
        status: ReservationStatus::Pending,
    })
}

pub fn fulfill_reservation(reservation: &Reservation) -> Result<Reservation, LifecycleError> {
    settle(reservation, "fulfill", ReservationStatus::Received)
}

pub fn cancel_reservation(reservation: &Reservation) -> Result<Reservation, LifecycleError> {
    settle(reservation, "cancel", ReservationStatus::Cancelled)
}

fn settle(
    reservation: &Reservation,
    operation: &'static str,
    target: ReservationStatus,
) -> Result<Reservation, LifecycleError> {
    if !reservation.is_pending() {
        return Err(LifecycleError::invalid_state(
            "reservation",
            operation,
            reservation.status,
        ));
    }
    Ok(Reservation {
        status: target,
        ..reservation.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn pending() -> Reservation {
        create_reservation(
            ReservationId(1),
            3,
            NewReservation {
                member_id: "m1".into(),
                book_id: "b1".into(),
                reservation_date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_create_is_pending_and_numbered() {
        let reservation = pending();
        assert_eq!(reservation.status(), ReservationStatus::Pending);
        assert_eq!(reservation.number().to_string(), "RS20240003");
    }

    #[test]
    fn test_fulfill_and_cancel_from_pending() {
        let reservation = pending();

        let fulfilled = fulfill_reservation(&reservation).unwrap();
        assert_eq!(fulfilled.status(), ReservationStatus::Received);

        let cancelled = cancel_reservation(&reservation).unwrap();
        assert_eq!(cancelled.status(), ReservationStatus::Cancelled);

        // The input is untouched.
        assert!(reservation.is_pending());
    }

    #[test]
    fn test_terminal_states_reject_every_transition() {
        let cancelled = cancel_reservation(&pending()).unwrap();
        assert_matches!(
            fulfill_reservation(&cancelled),
            Err(LifecycleError::InvalidState { operation: "fulfill", .. })
        );
        assert_matches!(
            cancel_reservation(&cancelled),
            Err(LifecycleError::InvalidState { .. })
        );

        let received = fulfill_reservation(&pending()).unwrap();
        assert_matches!(
            cancel_reservation(&received),
            Err(LifecycleError::InvalidState { status, .. }) if status == "RECEIVED"
        );
        assert_matches!(
            fulfill_reservation(&received),
            Err(LifecycleError::InvalidState { .. })
        );
    }

    #[test]
    fn test_create_rejects_blank_book() {
        let result = create_reservation(
            ReservationId(1),
            1,
            NewReservation {
                member_id: "m1".into(),
                book_id: "".into(),
                reservation_date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            },
        );
        assert_matches!(result, Err(LifecycleError::InvalidInput(_)));
    }
}
