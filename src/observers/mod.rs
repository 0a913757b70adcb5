//! # Event observers.
//!
//! This module provides the [`Observe`] trait, the [`ObserverFn`] closure adapter
//! and (with the `logging` feature) the built-in [`LogObserver`].
//!
//! ## Architecture
//! ```text
//! Dispatcher::emit(event)
//!     │
//!     └──► snapshot ──► Observe::on_event(&event)
//!                          │
//!                     ┌────┴────┬──────────┬───────┐
//!                     ▼         ▼          ▼       ▼
//!                LogObserver  Metrics   Custom    ...
//! ```

#[cfg(feature = "logging")]
mod log;
mod observer;

#[cfg(feature = "logging")]
pub use log::LogObserver;
pub(crate) use observer::same_observer;
pub use observer::{Observe, ObserverFn, ObserverRef};
