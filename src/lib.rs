//! # fanout
//!
//! **fanout** is an in-process publish/subscribe primitive for Rust.
//!
//! It provides a thread-safe registry of observers and two ways to notify them
//! of an event: synchronously on the caller's thread, or in parallel with one
//! tokio task per observer. Events are opaque: the crate never inspects them.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Observer   │   │   Observer   │   │   Observer   │
//!     │  (user #1)   │   │  (user #2)   │   │  (user #3)   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼ add/remove       ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Registry (copy-on-write Arc<[ObserverRef<E>]> behind RwLock)     │
//! │  - add: scan + publish new sequence                               │
//! │  - remove: scan + publish new sequence                            │
//! │  - snapshot: Arc clone, lock released before delivery             │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼ emit(event)
//!              ┌────────────────────┴────────────────────┐
//!              ▼                                         ▼
//!       SyncDispatcher                           ParallelDispatcher
//!   (caller thread, in order)                (one task per observer)
//!      o1 ─► o2 ─► o3                         o1     o2     o3
//!                                              ▼      ▼      ▼
//!                                           on_event on_event on_event
//! ```
//!
//! ### Snapshot isolation
//! ```text
//! emit ──► snapshot S ──► deliver to every observer in S
//!                  ▲
//! add/remove ──────┘ publish S' (S untouched; affects only later emits)
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                            |
//! |-------------------|--------------------------------------------------------------|-----------------------------------------------|
//! | **Observer API**  | Plug event handlers into a dispatcher.                       | [`Observe`], [`ObserverFn`], [`ObserverRef`]  |
//! | **Dispatch**      | Register, unregister, emit.                                  | [`Dispatch`], [`Registry`]                    |
//! | **Delivery**      | Ordered synchronous or fire-and-forget parallel fan-out.     | [`SyncDispatcher`], [`ParallelDispatcher`]    |
//! | **Errors**        | Typed errors for setup and observer failures.                | [`RuntimeError`], [`ObserverError`]           |
//! | **Configuration** | Panic policy and spawn mode.                                 | [`Config`], [`PanicPolicy`], [`SpawnMode`]    |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogObserver`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use fanout::{Dispatch, ObserverFn, ObserverRef, SyncDispatcher};
//!
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter: ObserverRef<&'static str> = {
//!     let seen = Arc::clone(&seen);
//!     ObserverFn::arc("counter", move |_: &&'static str| {
//!         seen.fetch_add(1, Ordering::SeqCst);
//!     })
//! };
//!
//! let dispatcher = SyncDispatcher::new();
//! assert!(dispatcher.add(Arc::clone(&counter)));
//! assert!(!dispatcher.add(Arc::clone(&counter)));
//!
//! dispatcher.emit("deployed");
//! assert!(dispatcher.remove(&counter));
//! dispatcher.emit("deployed");
//!
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```
mod dispatcher;
mod error;
mod observers;

// ---- Public re-exports ----

pub use dispatcher::{
    Config, Dispatch, PanicPolicy, ParallelDispatcher, ParallelDispatcherBuilder, Registry,
    Snapshot, SpawnMode, SyncDispatcher,
};
pub use error::{ObserverError, RuntimeError};
pub use observers::{Observe, ObserverFn, ObserverRef};

// Optional: expose a simple built-in logging observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogObserver;
