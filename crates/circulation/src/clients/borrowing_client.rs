//! # Borrowing Client
//!
//! High-level API for the Borrowing actor. Returns go through a read-then-act cycle that
//! carries the version it read, retried on conflict.

use super::retry::with_conflict_retry;
use crate::borrowing_actor::BorrowingAction;
use crate::error::CirculationError;
use crate::model::{BookId, Borrowing, BorrowingId, BorrowingQuery, MemberId, NewBorrowing};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

/// Client for interacting with the Borrowing actor.
#[derive(Clone)]
pub struct BorrowingClient {
    inner: ResourceClient<Borrowing>,
}

impl BorrowingClient {
    pub fn new(inner: ResourceClient<Borrowing>) -> Self {
        Self { inner }
    }

    /// Checks a book out. The actor numbers the borrowing and verifies both references.
    #[instrument(skip(self, member_id, book_id))]
    pub async fn create_borrowing(
        &self,
        member_id: impl Into<MemberId> + Send,
        book_id: impl Into<BookId> + Send,
        borrow_date: NaiveDate,
        loan_period_days: i64,
    ) -> Result<Borrowing, CirculationError> {
        let params = NewBorrowing {
            member_id: member_id.into(),
            book_id: book_id.into(),
            borrow_date,
            loan_period_days,
        };
        debug!(?params, "create_borrowing called");

        let record = self.inner.create(params).await?;
        info!(number = %record.entity.number(), "Borrowing created");
        Ok(record.entity)
    }

    #[instrument(skip(self))]
    pub async fn return_borrowing(
        &self,
        id: BorrowingId,
        return_date: NaiveDate,
        fee_per_late_day: u32,
    ) -> Result<Borrowing, CirculationError> {
        let inner = &self.inner;
        let returned = with_conflict_retry("return_borrowing", || async move {
            let current = inner
                .get(id)
                .await?
                .ok_or_else(|| CirculationError::NotFound(id.to_string()))?;
            let action = BorrowingAction::Return {
                return_date,
                fee_per_late_day,
            };
            let record = inner.perform_action(id, Some(current.version), action).await?;
            Ok(record.entity)
        })
        .await?;

        info!(number = %returned.number(), late_fee = returned.late_fee(), "Borrowing returned");
        Ok(returned)
    }

    /// Borrowings matching `query`, ordered by borrowing number.
    #[instrument(skip(self))]
    pub async fn list_borrowings(
        &self,
        query: BorrowingQuery,
    ) -> Result<Vec<Borrowing>, CirculationError> {
        let mut borrowings = self.list(query).await?;
        borrowings.sort_by_key(Borrowing::number);
        Ok(borrowings)
    }
}

#[async_trait]
impl ActorClient<Borrowing> for BorrowingClient {
    type Error = CirculationError;

    fn inner(&self) -> &ResourceClient<Borrowing> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CirculationError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MAX_CONFLICT_ATTEMPTS;
    use crate::engine::{self, LifecycleError};
    use actor_framework::mock::{create_mock_client, expect_action, expect_get, MockClient};
    use actor_framework::Record;
    use assert_matches::assert_matches;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn active_record(version: u64) -> Record<Borrowing> {
        let borrowing = engine::create_borrowing(
            BorrowingId(1),
            1,
            NewBorrowing {
                member_id: "m1".into(),
                book_id: "b1".into(),
                borrow_date: date(2024, 1, 10),
                loan_period_days: 14,
            },
        )
        .unwrap();
        Record {
            version,
            entity: borrowing,
        }
    }

    fn returned_record(version: u64) -> Record<Borrowing> {
        let active = active_record(version - 1).entity;
        Record {
            version,
            entity: engine::return_borrowing(&active, date(2024, 2, 1), 5).unwrap(),
        }
    }

    fn conflict(expected: u64, actual: u64) -> FrameworkError {
        FrameworkError::Conflict {
            id: BorrowingId(1).to_string(),
            expected,
            actual,
        }
    }

    #[tokio::test]
    async fn test_return_sends_the_version_it_read() {
        let (generic, mut receiver) = create_mock_client::<Borrowing>(10);
        let client = BorrowingClient::new(generic);

        let task =
            tokio::spawn(async move { client.return_borrowing(BorrowingId(1), date(2024, 2, 1), 5).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, BorrowingId(1));
        responder.send(Ok(Some(active_record(4)))).unwrap();

        let (id, expected_version, action, responder) =
            expect_action(&mut receiver).await.expect("Expected Action request");
        assert_eq!(id, BorrowingId(1));
        assert_eq!(expected_version, Some(4));
        assert_matches!(
            action,
            BorrowingAction::Return { fee_per_late_day: 5, return_date } if return_date == date(2024, 2, 1)
        );
        responder.send(Ok(returned_record(5))).unwrap();

        let returned = task.await.unwrap().unwrap();
        assert_eq!(returned.late_fee(), 40);
    }

    #[tokio::test]
    async fn test_return_retries_conflicts_then_succeeds() {
        let mut mock = MockClient::<Borrowing>::new();
        mock.expect_get(BorrowingId(1)).return_ok(Some(active_record(1)));
        mock.expect_action(BorrowingId(1)).return_err(conflict(1, 2));
        mock.expect_get(BorrowingId(1)).return_ok(Some(active_record(2)));
        mock.expect_action(BorrowingId(1)).return_err(conflict(2, 3));
        mock.expect_get(BorrowingId(1)).return_ok(Some(active_record(3)));
        mock.expect_action(BorrowingId(1)).return_ok(returned_record(4));

        let client = BorrowingClient::new(mock.client());
        let returned = client
            .return_borrowing(BorrowingId(1), date(2024, 2, 1), 5)
            .await
            .unwrap();

        assert_eq!(returned.return_date(), Some(date(2024, 2, 1)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_return_surfaces_conflict_after_max_attempts() {
        let mut mock = MockClient::<Borrowing>::new();
        for attempt in 0..u64::from(MAX_CONFLICT_ATTEMPTS) {
            mock.expect_get(BorrowingId(1))
                .return_ok(Some(active_record(attempt + 1)));
            mock.expect_action(BorrowingId(1))
                .return_err(conflict(attempt + 1, attempt + 2));
        }

        let client = BorrowingClient::new(mock.client());
        let result = client
            .return_borrowing(BorrowingId(1), date(2024, 2, 1), 5)
            .await;

        assert_matches!(
            result,
            Err(CirculationError::Lifecycle(LifecycleError::Conflict(_)))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_rule_violations_are_not_retried() {
        let mut mock = MockClient::<Borrowing>::new();
        mock.expect_get(BorrowingId(1)).return_ok(Some(returned_record(2)));
        mock.expect_action(BorrowingId(1))
            .return_err(FrameworkError::EntityError(Box::new(
                LifecycleError::InvalidState {
                    entity: "borrowing",
                    operation: "return",
                    status: "RETURNED".to_string(),
                },
            )));

        let client = BorrowingClient::new(mock.client());
        let result = client
            .return_borrowing(BorrowingId(1), date(2024, 2, 2), 5)
            .await;

        assert_matches!(
            result,
            Err(CirculationError::Lifecycle(LifecycleError::InvalidState { .. }))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_return_of_unknown_borrowing_is_not_found() {
        let mut mock = MockClient::<Borrowing>::new();
        mock.expect_get(BorrowingId(9)).return_ok(None);

        let client = BorrowingClient::new(mock.client());
        let result = client
            .return_borrowing(BorrowingId(9), date(2024, 2, 1), 5)
            .await;

        assert_matches!(result, Err(CirculationError::NotFound(id)) if id == "borrowing_9");
        mock.verify();
    }
}
