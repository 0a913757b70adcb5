//! # Synchronous dispatcher.
//!
//! [`SyncDispatcher`] delivers each event on the caller's thread, one observer
//! after another, in registration order.
//!
//! ## Rules
//! - `emit` (owned event) and `emit_ref` (borrowed event) return only after
//!   every observer in the snapshot has returned.
//! - A slow observer delays every observer registered after it.
//! - Observers added or removed during an emission do not change who receives it.
//!
//! ## Panic handling
//! Controlled by [`Config::panic_policy`]:
//! - [`PanicPolicy::Isolate`] (default): panic caught, logged, delivery continues
//! - [`PanicPolicy::Propagate`]: panic unwinds out of `emit`, remaining observers skipped
//!
//! ## Example
//! ```rust
//! use fanout::{Dispatch, ObserverFn, SyncDispatcher};
//!
//! let dispatcher = SyncDispatcher::new();
//! dispatcher.add(ObserverFn::arc("print", |id: &u32| println!("deployed #{id}")));
//! dispatcher.emit(7);
//! dispatcher.emit_ref(&8);
//! ```

use super::config::{Config, PanicPolicy};
use super::deliver_isolated;
use super::dispatch::Dispatch;
use super::registry::Registry;

/// Dispatcher that invokes observers in order on the calling thread.
pub struct SyncDispatcher<E> {
    registry: Registry<E>,
    config: Config,
}

impl<E: 'static> SyncDispatcher<E> {
    /// Creates an empty dispatcher with the default [`Config`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty dispatcher with the given [`Config`].
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            registry: Registry::new(),
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Delivers a borrowed `event` to every registered observer, in order,
    /// before returning.
    ///
    /// [`Dispatch::emit`] takes the event by value and forwards here.
    pub fn emit_ref(&self, event: &E) {
        let observers = self.registry.snapshot();
        tracing::trace!(dispatcher = "sync", observers = observers.len(), "emit");

        for observer in observers.iter() {
            match self.config.panic_policy {
                PanicPolicy::Isolate => deliver_isolated(observer, event),
                PanicPolicy::Propagate => observer.on_event(event),
            }
        }
    }
}

impl<E: 'static> Default for SyncDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> Dispatch<E> for SyncDispatcher<E> {
    fn registry(&self) -> &Registry<E> {
        &self.registry
    }

    fn emit(&self, event: E) {
        self.emit_ref(&event)
    }
}
