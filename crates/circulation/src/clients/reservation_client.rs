//! # Reservation Client
//!
//! High-level API for the Reservation actor.

use super::retry::with_conflict_retry;
use crate::error::CirculationError;
use crate::model::{BookId, MemberId, NewReservation, Reservation, ReservationId, ReservationQuery};
use crate::reservation_actor::ReservationAction;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

/// Client for interacting with the Reservation actor.
#[derive(Clone)]
pub struct ReservationClient {
    inner: ResourceClient<Reservation>,
}

impl ReservationClient {
    pub fn new(inner: ResourceClient<Reservation>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, member_id, book_id))]
    pub async fn create_reservation(
        &self,
        member_id: impl Into<MemberId> + Send,
        book_id: impl Into<BookId> + Send,
        reservation_date: NaiveDate,
    ) -> Result<Reservation, CirculationError> {
        let params = NewReservation {
            member_id: member_id.into(),
            book_id: book_id.into(),
            reservation_date,
        };
        debug!(?params, "create_reservation called");

        let record = self.inner.create(params).await?;
        info!(number = %record.entity.number(), "Reservation created");
        Ok(record.entity)
    }

    #[instrument(skip(self))]
    pub async fn fulfill_reservation(
        &self,
        id: ReservationId,
    ) -> Result<Reservation, CirculationError> {
        self.transition(id, ReservationAction::Fulfill).await
    }

    #[instrument(skip(self))]
    pub async fn cancel_reservation(
        &self,
        id: ReservationId,
    ) -> Result<Reservation, CirculationError> {
        self.transition(id, ReservationAction::Cancel).await
    }

    /// Reservations matching `query`, ordered by reservation number.
    #[instrument(skip(self))]
    pub async fn list_reservations(
        &self,
        query: ReservationQuery,
    ) -> Result<Vec<Reservation>, CirculationError> {
        let mut reservations = self.list(query).await?;
        reservations.sort_by_key(Reservation::number);
        Ok(reservations)
    }

    async fn transition(
        &self,
        id: ReservationId,
        action: ReservationAction,
    ) -> Result<Reservation, CirculationError> {
        let inner = &self.inner;
        let reservation = with_conflict_retry("reservation_transition", || async move {
            let current = inner
                .get(id)
                .await?
                .ok_or_else(|| CirculationError::NotFound(id.to_string()))?;
            let record = inner.perform_action(id, Some(current.version), action).await?;
            Ok(record.entity)
        })
        .await?;

        info!(number = %reservation.number(), status = %reservation.status(), "Reservation updated");
        Ok(reservation)
    }
}

#[async_trait]
impl ActorClient<Reservation> for ReservationClient {
    type Error = CirculationError;

    fn inner(&self) -> &ResourceClient<Reservation> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CirculationError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{self, LifecycleError};
    use actor_framework::mock::MockClient;
    use actor_framework::Record;
    use assert_matches::assert_matches;

    fn pending(id: u32, sequence: u32) -> Reservation {
        engine::create_reservation(
            ReservationId(id),
            sequence,
            NewReservation {
                member_id: "m1".into(),
                book_id: "b1".into(),
                reservation_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_cancel_retries_once_on_conflict() {
        let mut mock = MockClient::<Reservation>::new();
        let reservation = pending(1, 1);
        let cancelled = engine::cancel_reservation(&reservation).unwrap();

        mock.expect_get(ReservationId(1)).return_ok(Some(Record {
            version: 1,
            entity: reservation.clone(),
        }));
        mock.expect_action(ReservationId(1))
            .return_err(FrameworkError::Conflict {
                id: "reservation_1".to_string(),
                expected: 1,
                actual: 2,
            });
        mock.expect_get(ReservationId(1)).return_ok(Some(Record {
            version: 2,
            entity: reservation,
        }));
        mock.expect_action(ReservationId(1)).return_ok(Record {
            version: 3,
            entity: cancelled,
        });

        let client = ReservationClient::new(mock.client());
        let result = client.cancel_reservation(ReservationId(1)).await.unwrap();

        assert_eq!(result.status(), crate::model::ReservationStatus::Cancelled);
        mock.verify();
    }

    #[tokio::test]
    async fn test_fulfill_reports_invalid_state() {
        let mut mock = MockClient::<Reservation>::new();
        let cancelled = engine::cancel_reservation(&pending(1, 1)).unwrap();
        mock.expect_get(ReservationId(1)).return_ok(Some(Record {
            version: 2,
            entity: cancelled.clone(),
        }));
        mock.expect_action(ReservationId(1))
            .return_err(FrameworkError::EntityError(Box::new(
                engine::fulfill_reservation(&cancelled).unwrap_err(),
            )));

        let client = ReservationClient::new(mock.client());
        let result = client.fulfill_reservation(ReservationId(1)).await;

        assert_matches!(
            result,
            Err(CirculationError::Lifecycle(LifecycleError::InvalidState { status, .. })) if status == "CANCELLED"
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_number() {
        let mut mock = MockClient::<Reservation>::new();
        mock.expect_list().return_ok(vec![
            Record::new(pending(3, 3)),
            Record::new(pending(1, 1)),
            Record::new(pending(2, 2)),
        ]);

        let client = ReservationClient::new(mock.client());
        let listed = client
            .list_reservations(ReservationQuery::default())
            .await
            .unwrap();

        let numbers: Vec<String> = listed.iter().map(|r| r.number().to_string()).collect();
        assert_eq!(numbers, ["RS20240001", "RS20240002", "RS20240003"]);
        mock.verify();
    }
}
