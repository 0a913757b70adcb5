//! # Parallel dispatcher: fire-and-forget fan-out over tokio.
//!
//! [`ParallelDispatcher`] spawns one independent task per observer per event
//! and returns without awaiting any of them.
//!
//! ## What it guarantees
//! - `emit(event)` returns immediately after spawning.
//! - Each observer in the snapshot receives the event exactly once.
//! - Panics inside observers are caught and logged (isolation).
//!
//! ## What it does **not** guarantee
//! - No ordering across observers.
//! - No completion signal: callers that need one synchronize through the
//!   observer itself (channel, counter, barrier).
//! - Tasks still running when the runtime shuts down are abandoned.
//!
//! ## Diagram
//! ```text
//!    emit(event) ──► Arc<E>
//!        │                  (Arc-clone per observer)
//!        ├────────────────► task O1 ─► on_event()
//!        ├────────────────► task O2 ─► on_event()
//!        └────────────────► task ON ─► on_event()
//! ```
//!
//! ## Example
//! ```rust
//! use fanout::{Dispatch, ObserverFn, ParallelDispatcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fanout::RuntimeError> {
//!     let dispatcher = ParallelDispatcher::new()?;
//!     let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//!
//!     dispatcher.add(ObserverFn::arc("forward", move |n: &u64| {
//!         let _ = tx.send(*n);
//!     }));
//!     dispatcher.emit(42);
//!
//!     assert_eq!(rx.recv().await, Some(42));
//!     Ok(())
//! }
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use futures::FutureExt;
use tokio::runtime::Handle;

use super::config::{Config, SpawnMode};
use super::deliver_isolated;
use super::dispatch::Dispatch;
use super::registry::Registry;
use crate::error::{ObserverError, RuntimeError};

/// Dispatcher that invokes every observer on its own tokio task.
pub struct ParallelDispatcher<E> {
    registry: Registry<E>,
    handle: Handle,
    config: Config,
}

impl<E> ParallelDispatcher<E>
where
    E: Send + Sync + 'static,
{
    /// Creates an empty dispatcher bound to the current tokio runtime.
    ///
    /// Fails with [`RuntimeError::NoRuntime`] outside a runtime context.
    pub fn new() -> Result<Self, RuntimeError> {
        Self::with_config(Config::default())
    }

    /// Same as [`new`](Self::new) with an explicit [`Config`].
    pub fn with_config(config: Config) -> Result<Self, RuntimeError> {
        let handle = Handle::try_current().map_err(|_| RuntimeError::NoRuntime)?;
        Ok(Self::with_handle(handle, config))
    }

    /// Creates an empty dispatcher that spawns onto `handle`.
    ///
    /// `emit` may then be called from any thread, inside or outside the runtime.
    #[must_use]
    pub fn with_handle(handle: Handle, config: Config) -> Self {
        Self {
            registry: Registry::new(),
            handle,
            config,
        }
    }

    /// Returns a builder for fluent construction.
    #[must_use]
    pub fn builder() -> ParallelDispatcherBuilder<E> {
        ParallelDispatcherBuilder::new()
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Spawns one delivery task per registered observer and returns.
    pub fn emit(&self, event: E) {
        let observers = self.registry.snapshot();
        tracing::trace!(dispatcher = "parallel", observers = observers.len(), "emit");

        if observers.is_empty() {
            return;
        }

        let event = Arc::new(event);
        for observer in observers.iter() {
            let observer = Arc::clone(observer);
            let event = Arc::clone(&event);

            match self.config.spawn_mode {
                SpawnMode::Blocking => {
                    self.handle
                        .spawn_blocking(move || deliver_isolated(&observer, event.as_ref()));
                }
                SpawnMode::Async => {
                    self.handle.spawn(async move {
                        let fut = async { observer.on_event(event.as_ref()) };
                        let res = std::panic::AssertUnwindSafe(fut).catch_unwind().await;
                        if let Err(panic_err) = res {
                            ObserverError::from_panic(observer.name(), panic_err.as_ref()).log();
                        }
                    });
                }
            }
        }
    }
}

impl<E> Dispatch<E> for ParallelDispatcher<E>
where
    E: Send + Sync + 'static,
{
    fn registry(&self) -> &Registry<E> {
        &self.registry
    }

    fn emit(&self, event: E) {
        ParallelDispatcher::emit(self, event)
    }
}

/// Builder for [`ParallelDispatcher`].
pub struct ParallelDispatcherBuilder<E> {
    config: Config,
    handle: Option<Handle>,
    _event: PhantomData<fn(E)>,
}

impl<E> ParallelDispatcherBuilder<E>
where
    E: Send + Sync + 'static,
{
    /// Creates a builder with the default [`Config`] and no runtime handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            handle: None,
            _event: PhantomData,
        }
    }

    /// Sets the dispatcher configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the runtime observers are spawned on.
    ///
    /// Without it, [`build`](Self::build) uses the current runtime.
    pub fn handle(mut self, handle: Handle) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Builds the dispatcher.
    pub fn build(self) -> Result<ParallelDispatcher<E>, RuntimeError> {
        match self.handle {
            Some(handle) => Ok(ParallelDispatcher::with_handle(handle, self.config)),
            None => ParallelDispatcher::with_config(self.config),
        }
    }
}

impl<E> Default for ParallelDispatcherBuilder<E>
where
    E: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
