//! # Logging observer for debugging and demos.
//!
//! [`LogObserver`] records every event it receives as a `tracing` record at
//! `info` level. Useful for development and examples; implement a custom
//! [`Observe`] for anything structured.
//!
//! ## Output format
//! ```text
//! INFO fanout::observers::log: event observer="log" event=Deploy { id: 7 }
//! ```

use std::fmt::Debug;

use crate::Observe;

/// `tracing`-backed logging observer.
///
/// Enabled via the `logging` feature.
pub struct LogObserver {
    name: &'static str,
}

impl LogObserver {
    /// Creates a logging observer reporting under the given name.
    #[must_use]
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::named("log")
    }
}

impl<E> Observe<E> for LogObserver
where
    E: Debug + 'static,
{
    fn on_event(&self, event: &E) {
        tracing::info!(observer = self.name, event = ?event, "event");
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
