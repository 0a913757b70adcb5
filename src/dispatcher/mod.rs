//! Dispatcher core: observer registry and the two delivery strategies.
//!
//! ## Contents
//! - [`Registry`] copy-on-write observer set shared by both dispatchers
//! - [`Dispatch`] add/remove/emit capability
//! - [`SyncDispatcher`] ordered delivery on the caller's thread
//! - [`ParallelDispatcher`] one tokio task per observer per event
//! - [`Config`] panic policy and spawn mode
//!
//! ## Wiring
//! ```text
//! caller ── add/remove ──► Registry (write lock, publish new Arc<[..]>)
//!
//! caller ── emit(event) ──► Registry::snapshot() (read lock, Arc clone)
//!                               │
//!                 ┌─────────────┴──────────────┐
//!                 ▼                            ▼
//!          SyncDispatcher                ParallelDispatcher
//!       for o in snapshot:            for o in snapshot:
//!         o.on_event(&event)            spawn(o.on_event(&event))
//! ```

mod config;
mod dispatch;
mod parallel;
mod registry;
mod sync;

use std::panic::{self, AssertUnwindSafe};

pub use config::{Config, PanicPolicy, SpawnMode};
pub use dispatch::Dispatch;
pub use parallel::{ParallelDispatcher, ParallelDispatcherBuilder};
pub use registry::{Registry, Snapshot};
pub use sync::SyncDispatcher;

use crate::error::ObserverError;
use crate::observers::ObserverRef;

/// Invokes one observer, catching and logging a panic instead of unwinding.
fn deliver_isolated<E: 'static>(observer: &ObserverRef<E>, event: &E) {
    if let Err(panic_err) = panic::catch_unwind(AssertUnwindSafe(|| observer.on_event(event))) {
        ObserverError::from_panic(observer.name(), panic_err.as_ref()).log();
    }
}
