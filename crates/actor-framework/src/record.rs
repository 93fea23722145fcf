//! # Versioned Records
//!
//! Every entity held by a `ResourceActor` is wrapped in a [`Record`] carrying a version
//! number. Clients read the version together with the entity and hand it back with a
//! mutation; the actor rejects the mutation if the record moved on in between.

/// An entity together with its storage version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<T> {
    /// Starts at [`Record::INITIAL_VERSION`] and increases by one on every committed action.
    pub version: u64,
    pub entity: T,
}

impl<T> Record<T> {
    pub const INITIAL_VERSION: u64 = 1;

    /// Wraps a freshly created entity.
    pub fn new(entity: T) -> Self {
        Self {
            version: Self::INITIAL_VERSION,
            entity,
        }
    }

    /// Replaces the entity and bumps the version.
    pub fn commit(&mut self, entity: T) {
        self.entity = entity;
        self.version += 1;
    }

    pub fn into_entity(self) -> T {
        self.entity
    }
}
