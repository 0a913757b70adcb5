//! # Observer registry - copy-on-write observer set.
//!
//! Registry holds the ordered set of observers shared by a dispatcher:
//! - `add` → publishes `current + observer` (rejects duplicates)
//! - `remove` → publishes `current - observer` (order of the rest kept)
//! - `snapshot` → clones the currently published sequence
//!
//! ## Architecture
//! ```text
//! add/remove ──► write lock ──► scan ──► build new Arc<[..]> ──► swap slot
//!                                                                   │
//! emit ──► read lock ──► Arc::clone(slot) ──► unlock ──► iterate ◄──┘ (old sequences untouched)
//! ```
//!
//! ## Rules
//! - Published sequences are never mutated in place.
//! - The lock is held only across scan + swap, never across observer calls
//!   (`name()` and `Drop` of a released observer run after the guard is gone).
//! - No two entries share an identity (see [`ObserverRef`]).
//! - A snapshot taken before a mutation keeps seeing the old sequence.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::observers::{ObserverRef, same_observer};

/// Immutable, published observer sequence.
pub type Snapshot<E> = Arc<[ObserverRef<E>]>;

/// Thread-safe copy-on-write observer set.
pub struct Registry<E> {
    observers: RwLock<Snapshot<E>>,
}

impl<E: 'static> Registry<E> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Arc::from(Vec::new())),
        }
    }

    /// Registers an observer.
    ///
    /// Returns `false` (no change) if the same observer is already registered.
    pub fn add(&self, observer: ObserverRef<E>) -> bool {
        let (size, _prev) = {
            let mut slot = self.observers.write();
            if slot.iter().any(|o| same_observer(o, &observer)) {
                return false;
            }

            let mut next = Vec::with_capacity(slot.len() + 1);
            next.extend(slot.iter().cloned());
            next.push(Arc::clone(&observer));
            let prev = std::mem::replace(&mut *slot, Arc::from(next));
            (slot.len(), prev)
        };

        tracing::debug!(observer = observer.name(), observers = size, "observer added");
        true
    }

    /// Registers an optional observer; `None` is rejected with `false`.
    pub fn add_maybe(&self, observer: Option<ObserverRef<E>>) -> bool {
        observer.is_some_and(|o| self.add(o))
    }

    /// Unregisters an observer.
    ///
    /// Returns `false` (no change) if it is not registered.
    pub fn remove(&self, observer: &ObserverRef<E>) -> bool {
        // The previous sequence may hold the last reference to the observer:
        // it is dropped only after the guard is released.
        let (size, _prev) = {
            let mut slot = self.observers.write();
            let Some(idx) = slot.iter().position(|o| same_observer(o, observer)) else {
                return false;
            };

            let next: Vec<ObserverRef<E>> = slot[..idx]
                .iter()
                .chain(&slot[idx + 1..])
                .cloned()
                .collect();
            let prev = std::mem::replace(&mut *slot, Arc::from(next));
            (slot.len(), prev)
        };

        tracing::debug!(observer = observer.name(), observers = size, "observer removed");
        true
    }

    /// Unregisters an optional observer; `None` is never registered, so `false`.
    pub fn remove_maybe(&self, observer: Option<&ObserverRef<E>>) -> bool {
        observer.is_some_and(|o| self.remove(o))
    }

    /// Returns the currently published sequence.
    ///
    /// Cheap: one `Arc` clone under the read lock.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<E> {
        let slot = self.observers.read();
        Arc::clone(&*slot)
    }

    /// Returns true if the observer is registered.
    #[must_use]
    pub fn contains(&self, observer: &ObserverRef<E>) -> bool {
        self.observers
            .read()
            .iter()
            .any(|o| same_observer(o, observer))
    }

    /// Drops every observer and returns how many were registered.
    pub fn clear(&self) -> usize {
        let prev = std::mem::replace(&mut *self.observers.write(), Arc::from(Vec::new()));
        prev.len()
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    /// True if no observer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.read().is_empty()
    }
}

impl<E: 'static> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}
