//! # Dispatcher capability shared by both delivery strategies.
//!
//! [`Dispatch`] is the whole public surface a host application needs:
//! register, unregister, emit. Registration methods are provided on top of
//! [`Dispatch::registry`]; each dispatcher only decides how `emit` delivers.
//!
//! ## Membership
//! ```text
//!            add (true)
//!   absent ─────────────► registered
//!     ▲  ◄───────────────    │
//!     │     remove (true)    │
//!     └─ remove (false)      └─ add (false)
//! ```

use super::registry::{Registry, Snapshot};
use crate::observers::ObserverRef;

/// Observer registration plus an emission strategy.
pub trait Dispatch<E: 'static> {
    /// Backing observer set.
    fn registry(&self) -> &Registry<E>;

    /// Delivers `event` to every observer registered at call time.
    fn emit(&self, event: E);

    /// Registers an observer; `false` if it is already registered.
    fn add(&self, observer: ObserverRef<E>) -> bool {
        self.registry().add(observer)
    }

    /// Registers an optional observer; `None` yields `false`.
    fn add_maybe(&self, observer: Option<ObserverRef<E>>) -> bool {
        self.registry().add_maybe(observer)
    }

    /// Unregisters an observer; `false` if it is not registered.
    ///
    /// Safe to call from inside `on_event`: the emission in progress is unaffected.
    fn remove(&self, observer: &ObserverRef<E>) -> bool {
        self.registry().remove(observer)
    }

    /// Unregisters an optional observer; `None` yields `false`.
    fn remove_maybe(&self, observer: Option<&ObserverRef<E>>) -> bool {
        self.registry().remove_maybe(observer)
    }

    /// Currently registered observers, in registration order.
    fn snapshot(&self) -> Snapshot<E> {
        self.registry().snapshot()
    }

    /// True if the observer is registered.
    fn contains(&self, observer: &ObserverRef<E>) -> bool {
        self.registry().contains(observer)
    }

    /// Unregisters everything; returns how many observers were dropped.
    fn clear(&self) -> usize {
        self.registry().clear()
    }

    /// Number of registered observers.
    fn len(&self) -> usize {
        self.registry().len()
    }

    /// True if no observer is registered.
    fn is_empty(&self) -> bool {
        self.registry().is_empty()
    }
}
