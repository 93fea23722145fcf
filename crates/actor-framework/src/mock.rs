//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a
//! queue of expectations instead of by a running actor. It lets you test client-side logic
//! (retry loops, orchestration across clients) deterministically.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state management |
//! | **Use Case** | Unit testing logic *around* the client | Testing the actor itself or full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Failure Scenarios
//!
//! Version conflicts are hard to provoke against a real actor because it serializes
//! requests. With a mock they are one line:
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Ticket { id: u32 }
//! #[derive(Debug)] struct TicketCreate;
//! #[derive(Debug)] enum TicketAction { Close }
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct TicketError;
//!
//! #[async_trait]
//! impl ActorEntity for Ticket {
//!     type Id = u32; type Create = TicketCreate; type Action = TicketAction;
//!     type Query = (); type Scope = (); type Context = (); type Error = TicketError;
//!     fn sequence_scope(_: &TicketCreate) {}
//!     fn from_create_params(id: u32, _: u32, _: TicketCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn handle_action(&mut self, _: TicketAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     fn matches(&self, _: &()) -> bool { true }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Ticket>::new();
//!     let client = mock.client();
//!
//!     mock.expect_action(1).return_err(FrameworkError::Conflict {
//!         id: "1".into(),
//!         expected: 1,
//!         actual: 2,
//!     });
//!
//!     let result = client.perform_action(1, Some(1), TicketAction::Close).await;
//!     assert!(matches!(result, Err(e) if e.is_conflict()));
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and a receiver, or use the fluent [`MockClient`] API.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::record::Record;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
///
/// Expectations are consumed in FIFO order; a request that does not match the next
/// expectation's kind (or its ID) panics the mock task, which surfaces in the test as
/// `ActorDropped`.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<Record<T>>, FrameworkError>,
    },
    Create {
        response: Result<Record<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<Record<T>>, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<Record<T>, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Borrowing>::new();
/// mock.expect_get(BorrowingId(1)).return_ok(Some(Record::new(borrowing)));
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "action called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "delete called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<Record<T>>) {
        self.expectations.lock().unwrap().push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    pub fn return_ok(self, record: Record<T>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Create { response: Ok(record) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Create {
                response: Err(error),
            });
    }
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> ListExpectationBuilder<T> {
    pub fn return_ok(self, records: Vec<Record<T>>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::List {
                response: Ok(records),
            });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::List {
                response: Err(error),
            });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    pub fn return_ok(self, record: Record<T>) {
        self.expectations.lock().unwrap().push_back(Expectation::Action {
            id: self.id,
            response: Ok(record),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back(Expectation::Action {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: ActorEntity> DeleteExpectationBuilder<T> {
    pub fn return_ok(self) {
        self.expectations.lock().unwrap().push_back(Expectation::Delete {
            id: self.id,
            response: Ok(()),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back(Expectation::Delete {
            id: self.id,
            response: Err(error),
        });
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends messages to a channel the test controls, so the test can inspect each
/// request and answer it by hand. Consider [`MockClient`] for a more fluent API.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Create,
    tokio::sync::oneshot::Sender<Result<Record<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    tokio::sync::oneshot::Sender<Result<Option<Record<T>>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request.
///
/// Returns the target ID, the version the caller expected, the action and the responder.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    Option<u64>,
    T::Action,
    tokio::sync::oneshot::Sender<Result<Record<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            expected_version,
            action,
            respond_to,
        }) => Some((id, expected_version, action, respond_to)),
        _ => None,
    }
}
