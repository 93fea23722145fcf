//! # Scoped Sequence Counters
//!
//! A [`SequenceCounter`] hands out monotonically increasing numbers per scope. The owning
//! `ResourceActor` is the only writer, so `peek_next` followed by `commit` inside a single
//! message is atomic with respect to every other request to that actor.

use std::collections::HashMap;
use std::hash::Hash;

/// Last committed sequence number per scope.
#[derive(Debug, Clone)]
pub struct SequenceCounter<S> {
    last: HashMap<S, u32>,
}

impl<S: Eq + Hash> Default for SequenceCounter<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Eq + Hash> SequenceCounter<S> {
    pub fn new() -> Self {
        Self {
            last: HashMap::new(),
        }
    }

    /// The number the next creation in `scope` would receive. Scopes start at 1.
    pub fn peek_next(&self, scope: &S) -> u32 {
        self.current(scope).saturating_add(1)
    }

    /// Marks `value` as used. Older values never move the counter backwards.
    pub fn commit(&mut self, scope: S, value: u32) {
        let last = self.last.entry(scope).or_insert(0);
        if value > *last {
            *last = value;
        }
    }

    /// The last committed number in `scope`, or 0 if none was issued.
    pub fn current(&self, scope: &S) -> u32 {
        self.last.get(scope).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes_count_independently() {
        let mut counter = SequenceCounter::new();
        assert_eq!(counter.peek_next(&2024), 1);

        counter.commit(2024, 1);
        counter.commit(2024, 2);
        assert_eq!(counter.peek_next(&2024), 3);

        // A new year starts over.
        assert_eq!(counter.peek_next(&2025), 1);
    }

    #[test]
    fn peek_without_commit_does_not_advance() {
        let counter: SequenceCounter<i32> = SequenceCounter::new();
        assert_eq!(counter.peek_next(&2024), 1);
        assert_eq!(counter.peek_next(&2024), 1);
        assert_eq!(counter.current(&2024), 0);
    }

    #[test]
    fn stale_commit_is_ignored() {
        let mut counter = SequenceCounter::new();
        counter.commit("a", 5);
        counter.commit("a", 3);
        assert_eq!(counter.current(&"a"), 5);
    }
}
