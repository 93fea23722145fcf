use actor_framework::mock::MockClient;
use actor_framework::{FrameworkError, Record};
use assert_matches::assert_matches;
use chrono::NaiveDate;
use circulation::clients::{BorrowingClient, ReservationClient};
use circulation::config::LoanPolicy;
use circulation::engine::{self, LifecycleError};
use circulation::error::CirculationError;
use circulation::lifecycle::CirculationDesk;
use circulation::model::{
    Borrowing, BorrowingId, NewBorrowing, NewReservation, Reservation, ReservationId,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn pending_reservation() -> Reservation {
    engine::create_reservation(
        ReservationId(1),
        1,
        NewReservation {
            member_id: "m2".into(),
            book_id: "b1".into(),
            reservation_date: date(2024, 1, 11),
        },
    )
    .unwrap()
}

fn borrowing_for_claim() -> Borrowing {
    engine::create_borrowing(
        BorrowingId(7),
        7,
        NewBorrowing {
            member_id: "m2".into(),
            book_id: "b1".into(),
            borrow_date: date(2024, 1, 21),
            loan_period_days: 14,
        },
    )
    .unwrap()
}

/// Mocked actors: the reservation is cancelled between the desk's check and its
/// fulfilment, so the borrowing created for the claim must be withdrawn.
#[tokio::test]
async fn test_claim_withdraws_borrowing_when_fulfilment_fails() {
    let mut borrowing_mock = MockClient::<Borrowing>::new();
    let mut reservation_mock = MockClient::<Reservation>::new();
    let reservation = pending_reservation();
    let cancelled = engine::cancel_reservation(&reservation).unwrap();

    // 1. The desk sees a pending reservation
    reservation_mock
        .expect_get(ReservationId(1))
        .return_ok(Some(Record::new(reservation)));
    // 2. The borrowing is created
    borrowing_mock
        .expect_create()
        .return_ok(Record::new(borrowing_for_claim()));
    // 3. Fulfilment re-reads the reservation, which is now cancelled
    reservation_mock
        .expect_get(ReservationId(1))
        .return_ok(Some(Record {
            version: 2,
            entity: cancelled.clone(),
        }));
    reservation_mock
        .expect_action(ReservationId(1))
        .return_err(FrameworkError::EntityError(Box::new(
            engine::fulfill_reservation(&cancelled).unwrap_err(),
        )));
    // 4. The borrowing is withdrawn
    borrowing_mock.expect_delete(BorrowingId(7)).return_ok();

    let desk = CirculationDesk::with_clients(
        BorrowingClient::new(borrowing_mock.client()),
        ReservationClient::new(reservation_mock.client()),
        LoanPolicy::new(14, 5).unwrap(),
    );

    let result = desk.claim_reservation(ReservationId(1), date(2024, 1, 21)).await;

    assert_matches!(
        result,
        Err(CirculationError::Lifecycle(LifecycleError::InvalidState { operation: "fulfill", .. }))
    );
    borrowing_mock.verify();
    reservation_mock.verify();
}

#[tokio::test]
async fn test_claim_of_unknown_reservation_is_not_found() {
    let borrowing_mock = MockClient::<Borrowing>::new();
    let mut reservation_mock = MockClient::<Reservation>::new();
    reservation_mock.expect_get(ReservationId(3)).return_ok(None);

    let desk = CirculationDesk::with_clients(
        BorrowingClient::new(borrowing_mock.client()),
        ReservationClient::new(reservation_mock.client()),
        LoanPolicy::new(14, 5).unwrap(),
    );

    let result = desk.claim_reservation(ReservationId(3), date(2024, 1, 21)).await;

    assert_matches!(result, Err(CirculationError::NotFound(id)) if id == "reservation_3");
    borrowing_mock.verify();
    reservation_mock.verify();
}

/// The return commits before the reservation store is asked who is next; losing that
/// store must not turn the committed return into an error.
#[tokio::test]
async fn test_return_survives_failed_reservation_lookup() {
    let mut borrowing_mock = MockClient::<Borrowing>::new();
    let mut reservation_mock = MockClient::<Reservation>::new();
    let active = borrowing_for_claim();
    let returned = engine::return_borrowing(&active, date(2024, 2, 7), 5).unwrap();

    // 1. The return reads the active borrowing and commits
    borrowing_mock
        .expect_get(BorrowingId(7))
        .return_ok(Some(Record::new(active)));
    borrowing_mock
        .expect_action(BorrowingId(7))
        .return_ok(Record {
            version: 2,
            entity: returned.clone(),
        });
    // 2. The reservation actor is gone
    reservation_mock
        .expect_list()
        .return_err(FrameworkError::ActorClosed);

    let desk = CirculationDesk::with_clients(
        BorrowingClient::new(borrowing_mock.client()),
        ReservationClient::new(reservation_mock.client()),
        LoanPolicy::new(14, 5).unwrap(),
    );
    assert_eq!(desk.policy().fee_per_late_day(), 5);

    let outcome = desk.return_book(BorrowingId(7), date(2024, 2, 7)).await.unwrap();

    assert_eq!(outcome.borrowing, returned);
    assert_eq!(outcome.borrowing.late_fee(), 15);
    assert_eq!(outcome.next_reservation, None);
    borrowing_mock.verify();
    reservation_mock.verify();
}
