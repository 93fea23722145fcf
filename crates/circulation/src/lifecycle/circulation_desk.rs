use crate::clients::{BorrowingClient, ReservationClient};
use crate::config::{CirculationConfig, LoanPolicy};
use crate::directory::SharedDirectory;
use crate::engine::LifecycleError;
use crate::error::CirculationError;
use crate::model::{
    BookId, Borrowing, BorrowingId, BorrowingQuery, MemberId, Reservation, ReservationId,
    ReservationQuery,
};
use actor_framework::ActorClient;
use chrono::NaiveDate;
use tracing::{error, info, instrument, warn};

/// Result of [`CirculationDesk::return_book`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnOutcome {
    pub borrowing: Borrowing,
    /// The earliest pending reservation for the returned book, if anyone is waiting.
    pub next_reservation: Option<Reservation>,
}

/// Result of [`CirculationDesk::claim_reservation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    pub borrowing: Borrowing,
    pub reservation: Reservation,
}

/// The runtime orchestrator for circulation.
///
/// `CirculationDesk` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the Borrowing and Reservation actors
/// - **Dependency Wiring**: Injecting the member/book [`Directory`](crate::directory::Directory)
///   into both actors
/// - **Policy**: Applying the configured loan period and late fee
///
/// # Example
///
/// ```ignore
/// let desk = CirculationDesk::new(config, directory);
///
/// let borrowing = desk.check_out("m1", "b1", today).await?;
/// let outcome = desk.return_book(borrowing.id(), later).await?;
///
/// desk.shutdown().await?;
/// ```
pub struct CirculationDesk {
    /// Client for the Borrowing actor
    pub borrowings: BorrowingClient,

    /// Client for the Reservation actor
    pub reservations: ReservationClient,

    policy: LoanPolicy,

    /// Task handles for both actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CirculationDesk {
    /// Spawns both actors on the current Tokio runtime.
    pub fn new(config: CirculationConfig, directory: SharedDirectory) -> Self {
        // 1. Create actors
        let (borrowing_actor, borrowing_client) =
            crate::borrowing_actor::new(config.actor_buffer_size);
        let (reservation_actor, reservation_client) =
            crate::reservation_actor::new(config.actor_buffer_size);

        // 2. Start actors with the directory as context
        let borrowing_handle = tokio::spawn(borrowing_actor.run(directory.clone()));
        let reservation_handle = tokio::spawn(reservation_actor.run(directory));

        info!(
            loan_period_days = config.policy.loan_period_days(),
            fee_per_late_day = config.policy.fee_per_late_day(),
            "Circulation desk open"
        );

        Self {
            borrowings: BorrowingClient::new(borrowing_client),
            reservations: ReservationClient::new(reservation_client),
            policy: config.policy,
            handles: vec![borrowing_handle, reservation_handle],
        }
    }

    /// Builds a desk around clients whose actors are run elsewhere, such as mocks.
    ///
    /// `shutdown` then only drops the clients.
    pub fn with_clients(
        borrowings: BorrowingClient,
        reservations: ReservationClient,
        policy: LoanPolicy,
    ) -> Self {
        Self {
            borrowings,
            reservations,
            policy,
            handles: Vec::new(),
        }
    }

    pub fn policy(&self) -> LoanPolicy {
        self.policy
    }

    /// Lends `book_id` to `member_id` for the configured loan period.
    #[instrument(skip(self, member_id, book_id))]
    pub async fn check_out(
        &self,
        member_id: impl Into<MemberId> + Send,
        book_id: impl Into<BookId> + Send,
        borrow_date: NaiveDate,
    ) -> Result<Borrowing, CirculationError> {
        self.borrowings
            .create_borrowing(member_id, book_id, borrow_date, self.policy.loan_period_days())
            .await
    }

    /// Takes a book back at the configured fee and reports who is waiting for it next.
    ///
    /// Fails only if the return itself fails. `next_reservation` is `None` when nobody is
    /// waiting or the reservation store could not be asked.
    #[instrument(skip(self))]
    pub async fn return_book(
        &self,
        borrowing_id: BorrowingId,
        return_date: NaiveDate,
    ) -> Result<ReturnOutcome, CirculationError> {
        let borrowing = self
            .borrowings
            .return_borrowing(borrowing_id, return_date, self.policy.fee_per_late_day())
            .await?;

        // The return is committed; a failed lookup only loses the hint.
        let next_reservation = match self
            .reservations
            .list_reservations(ReservationQuery::pending_for_book(borrowing.book_id().clone()))
            .await
        {
            Ok(pending) => pending.into_iter().next(),
            Err(e) => {
                warn!(
                    error = %e,
                    borrowing = %borrowing.number(),
                    "Could not look up pending reservations"
                );
                None
            }
        };

        if let Some(reservation) = &next_reservation {
            info!(
                book_id = %borrowing.book_id(),
                reservation = %reservation.number(),
                "Returned book is reserved"
            );
        }

        Ok(ReturnOutcome {
            borrowing,
            next_reservation,
        })
    }

    #[instrument(skip(self, member_id, book_id))]
    pub async fn reserve(
        &self,
        member_id: impl Into<MemberId> + Send,
        book_id: impl Into<BookId> + Send,
        reservation_date: NaiveDate,
    ) -> Result<Reservation, CirculationError> {
        self.reservations
            .create_reservation(member_id, book_id, reservation_date)
            .await
    }

    pub async fn cancel_reservation(
        &self,
        reservation_id: ReservationId,
    ) -> Result<Reservation, CirculationError> {
        self.reservations.cancel_reservation(reservation_id).await
    }

    /// Hands a reserved book to the member who reserved it.
    ///
    /// Creates the borrowing first, then fulfills the reservation. If fulfilment fails
    /// (for example because the reservation was cancelled in between) the new borrowing is
    /// deleted again and the fulfilment error is returned.
    #[instrument(skip(self))]
    pub async fn claim_reservation(
        &self,
        reservation_id: ReservationId,
        borrow_date: NaiveDate,
    ) -> Result<Handoff, CirculationError> {
        let reservation = self
            .reservations
            .get(reservation_id)
            .await?
            .ok_or_else(|| CirculationError::NotFound(reservation_id.to_string()))?;
        if !reservation.is_pending() {
            return Err(LifecycleError::InvalidState {
                entity: "reservation",
                operation: "claim",
                status: reservation.status().to_string(),
            }
            .into());
        }

        let borrowing = self
            .check_out(
                reservation.member_id().clone(),
                reservation.book_id().clone(),
                borrow_date,
            )
            .await?;

        match self.reservations.fulfill_reservation(reservation_id).await {
            Ok(reservation) => {
                info!(
                    reservation = %reservation.number(),
                    borrowing = %borrowing.number(),
                    "Reservation claimed"
                );
                Ok(Handoff {
                    borrowing,
                    reservation,
                })
            }
            Err(e) => {
                warn!(error = %e, borrowing = %borrowing.number(), "Fulfilment failed, withdrawing borrowing");
                if let Err(delete_error) = self.borrowings.delete(borrowing.id()).await {
                    error!(error = %delete_error, borrowing = %borrowing.number(), "Could not withdraw borrowing");
                }
                Err(e)
            }
        }
    }

    /// Active borrowings past their due date on `on`, ordered by borrowing number.
    pub async fn overdue(&self, on: NaiveDate) -> Result<Vec<Borrowing>, CirculationError> {
        self.borrowings
            .list_borrowings(BorrowingQuery::overdue_on(on))
            .await
    }

    /// Gracefully shuts down both actors.
    ///
    /// Dropping the desk's clients closes the actors' channels; each actor drains its queue
    /// and exits. Clones of the clients held elsewhere keep their actor alive, so drop them
    /// before calling this.
    pub async fn shutdown(self) -> Result<(), CirculationError> {
        info!("Closing circulation desk...");

        drop(self.borrowings);
        drop(self.reservations);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(CirculationError::ActorCommunicationError(format!(
                    "Actor task failed: {e}"
                )));
            }
        }

        info!("Circulation desk closed.");
        Ok(())
    }
}
