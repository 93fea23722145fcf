use actor_framework::ActorClient;
use assert_matches::assert_matches;
use async_trait::async_trait;
use chrono::NaiveDate;
use circulation::clients::BorrowingClient;
use circulation::directory::Directory;
use circulation::engine::LifecycleError;
use circulation::error::CirculationError;
use circulation::model::{BookId, BorrowingQuery, BorrowingStatus, MemberId};
use std::sync::Arc;

/// Knows every book but refuses members whose id starts with "banned".
struct ScreeningDirectory;

#[async_trait]
impl Directory for ScreeningDirectory {
    async fn member_exists(&self, member_id: &MemberId) -> bool {
        !member_id.as_str().starts_with("banned")
    }

    async fn book_exists(&self, _book_id: &BookId) -> bool {
        true
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Real Borrowing actor with a stub directory as its context.
#[tokio::test]
async fn test_borrowing_actor_checks_references_on_create() {
    let (actor, generic_client) = circulation::borrowing_actor::new(8);
    let client = BorrowingClient::new(generic_client);
    let handle = tokio::spawn(actor.run(Arc::new(ScreeningDirectory)));

    let refused = client
        .create_borrowing("banned-1", "b1", date(2024, 4, 1), 21)
        .await;
    assert_matches!(
        refused,
        Err(CirculationError::Lifecycle(LifecycleError::Reference(msg))) if msg.contains("banned-1")
    );

    let invalid = client
        .create_borrowing("m1", "b1", date(2024, 4, 1), 0)
        .await;
    assert_matches!(
        invalid,
        Err(CirculationError::Lifecycle(LifecycleError::InvalidInput(_)))
    );

    // Neither refusal used up a number
    let borrowing = client
        .create_borrowing("m1", "b1", date(2024, 4, 1), 21)
        .await
        .unwrap();
    assert_eq!(borrowing.number().to_string(), "BR20240001");
    assert_eq!(borrowing.due_date(), date(2024, 4, 22));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_borrowing_actor_filters_and_sorts() {
    let (actor, generic_client) = circulation::borrowing_actor::new(8);
    let client = BorrowingClient::new(generic_client);
    let handle = tokio::spawn(actor.run(Arc::new(ScreeningDirectory)));

    let first = client
        .create_borrowing("m1", "b1", date(2024, 1, 1), 7)
        .await
        .unwrap();
    let second = client
        .create_borrowing("m2", "b2", date(2024, 1, 5), 7)
        .await
        .unwrap();
    let third = client
        .create_borrowing("m1", "b3", date(2024, 1, 9), 7)
        .await
        .unwrap();
    client
        .return_borrowing(second.id(), date(2024, 1, 18), 2)
        .await
        .unwrap();

    let for_m1 = client
        .list_borrowings(BorrowingQuery::for_member("m1"))
        .await
        .unwrap();
    let ids: Vec<_> = for_m1.iter().map(|b| b.id()).collect();
    assert_eq!(ids, vec![first.id(), third.id()]);

    // On 2024-01-12 only the first is past due; the second is returned
    let overdue = client
        .list_borrowings(BorrowingQuery::overdue_on(date(2024, 1, 12)))
        .await
        .unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].id(), first.id());

    let returned = client
        .list_borrowings(BorrowingQuery {
            status: Some(BorrowingStatus::Returned),
            ..BorrowingQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(returned.len(), 1);
    assert_eq!(returned[0].late_fee(), 12);

    // Delete through the ActorClient defaults
    client.delete(third.id()).await.unwrap();
    assert!(client.get(third.id()).await.unwrap().is_none());
    assert_matches!(
        client.delete(third.id()).await,
        Err(CirculationError::NotFound(_))
    );

    drop(client);
    handle.await.unwrap();
}
