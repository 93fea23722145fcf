//! # Member & Book Directory
//!
//! Borrowings and reservations reference members and books owned by other systems. The
//! store actors receive a [`Directory`] as their context and consult it in `on_create`, so a
//! record pointing at an unknown member or book is never stored and never takes a number.

use crate::engine::LifecycleError;
use crate::model::{BookId, MemberId};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Existence checks against the systems that own members and books.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn member_exists(&self, member_id: &MemberId) -> bool;
    async fn book_exists(&self, book_id: &BookId) -> bool;
}

/// Shared handle injected into the store actors.
pub type SharedDirectory = Arc<dyn Directory>;

/// Fails with [`LifecycleError::Reference`] naming the first missing reference.
pub async fn verify_references(
    directory: &dyn Directory,
    member_id: &MemberId,
    book_id: &BookId,
) -> Result<(), LifecycleError> {
    if !directory.member_exists(member_id).await {
        debug!(%member_id, "Unknown member");
        return Err(LifecycleError::Reference(format!(
            "member {member_id} does not exist"
        )));
    }
    if !directory.book_exists(book_id).await {
        debug!(%book_id, "Unknown book");
        return Err(LifecycleError::Reference(format!(
            "book {book_id} does not exist"
        )));
    }
    Ok(())
}

/// A directory kept in memory, for the demo binary and tests.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    members: RwLock<HashSet<MemberId>>,
    books: RwLock<HashSet<BookId>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a directory with the given members and books.
    pub fn with_entries<M, B>(members: M, books: B) -> Self
    where
        M: IntoIterator,
        M::Item: Into<MemberId>,
        B: IntoIterator,
        B::Item: Into<BookId>,
    {
        Self {
            members: RwLock::new(members.into_iter().map(Into::into).collect()),
            books: RwLock::new(books.into_iter().map(Into::into).collect()),
        }
    }

    pub async fn register_member(&self, member_id: impl Into<MemberId>) {
        self.members.write().await.insert(member_id.into());
    }

    pub async fn register_book(&self, book_id: impl Into<BookId>) {
        self.books.write().await.insert(book_id.into());
    }

    pub async fn remove_member(&self, member_id: &MemberId) -> bool {
        self.members.write().await.remove(member_id)
    }

    pub async fn remove_book(&self, book_id: &BookId) -> bool {
        self.books.write().await.remove(book_id)
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn member_exists(&self, member_id: &MemberId) -> bool {
        self.members.read().await.contains(member_id)
    }

    async fn book_exists(&self, book_id: &BookId) -> bool {
        self.books.read().await.contains(book_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_verify_references_names_the_missing_side() {
        let directory = InMemoryDirectory::with_entries(["m1"], ["b1"]);

        assert!(verify_references(&directory, &"m1".into(), &"b1".into())
            .await
            .is_ok());

        let missing_member = verify_references(&directory, &"m2".into(), &"b1".into()).await;
        assert_matches!(missing_member, Err(LifecycleError::Reference(msg)) if msg.contains("member m2"));

        let missing_book = verify_references(&directory, &"m1".into(), &"b9".into()).await;
        assert_matches!(missing_book, Err(LifecycleError::Reference(msg)) if msg.contains("book b9"));
    }

    #[tokio::test]
    async fn test_register_and_remove() {
        let directory = InMemoryDirectory::new();
        let member = MemberId::from("m1");

        assert!(!directory.member_exists(&member).await);
        directory.register_member("m1").await;
        assert!(directory.member_exists(&member).await);
        assert!(directory.remove_member(&member).await);
        assert!(!directory.member_exists(&member).await);
    }
}
