//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns a collection of
//! records. It implements the "Server" side of the Actor Model, processing messages
//! sequentially and ensuring exclusive access to the record store and its sequence counters.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::record::Record;
use crate::sequence::SequenceCounter;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of versioned records.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`, `sequences`)
/// and the receiver end of the channel.
///
/// **Concurrency Model**:
/// Each `ResourceActor` processes its own messages *sequentially* in a loop, so the store
/// needs no `Mutex` or `RwLock`. The same property makes sequence allocation atomic:
/// two concurrent `Create` requests are queued and handled one after the other, and each
/// one sees the counter the previous one committed.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// # Operations
///
/// * **Create**:
///     1. Asks the entity for its sequence scope and peeks the next number in it.
///     2. Builds the entity with `T::from_create_params` and runs `on_create`.
///     3. Only then commits the sequence number and stores the record at version 1.
///
/// * **Action**:
///     1. Rejects the request with `Conflict` if `expected_version` is stale.
///     2. Runs `handle_action` on a copy of the entity.
///     3. Commits the copy (version + 1) only if the hook succeeded.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, Record<T>>,
    sequences: SequenceCounter<T::Scope>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            sequences: SequenceCounter::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to reach external collaborators that were created *after* the actor was
    /// instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        // Short type name, e.g. "Borrowing" instead of "circulation::model::borrowing::Borrowing"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let scope = T::sequence_scope(&params);
                    let sequence = self.sequences.peek_next(&scope);
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), sequence, params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.sequences.commit(scope.clone(), sequence);
                            let record = Record::new(item);
                            self.store.insert(id.clone(), record.clone());
                            info!(entity_type, %id, ?scope, sequence, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(record));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let record = self.store.get(&id).cloned();
                    let found = record.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(record));
                }
                ResourceRequest::List { query, respond_to } => {
                    let records: Vec<Record<T>> = self
                        .store
                        .values()
                        .filter(|record| record.entity.matches(&query))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?query, matched = records.len(), "List");
                    let _ = respond_to.send(Ok(records));
                }
                ResourceRequest::Action {
                    id,
                    expected_version,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?expected_version, ?action, "Action");
                    let Some(record) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };

                    if let Some(expected) = expected_version {
                        if expected != record.version {
                            warn!(entity_type, %id, expected, actual = record.version, "Stale version");
                            let _ = respond_to.send(Err(FrameworkError::Conflict {
                                id: id.to_string(),
                                expected,
                                actual: record.version,
                            }));
                            continue;
                        }
                    }

                    let mut draft = record.entity.clone();
                    match draft.handle_action(action, &context).await {
                        Ok(()) => {
                            record.commit(draft);
                            info!(entity_type, %id, version = record.version, "Action ok");
                            let _ = respond_to.send(Ok(record.clone()));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(record) = self.store.get(&id) {
                        if let Err(e) = record.entity.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
