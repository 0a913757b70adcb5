//! Error types used by the dispatchers.
//!
//! This module defines two enums:
//!
//! - [`RuntimeError`] — errors raised while constructing a dispatcher.
//! - [`ObserverError`] — failures of a single observer invocation.
//!
//! Neither is ever returned by `add`, `remove` or `emit`: registration outcomes
//! are plain booleans and observer failures are logged, not propagated.
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::any::Any;

use thiserror::Error;

/// # Errors produced while setting up a dispatcher.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// A parallel dispatcher was created outside a tokio runtime and no
    /// explicit runtime handle was supplied.
    #[error("no tokio runtime available to spawn observer tasks")]
    NoRuntime,
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use fanout::RuntimeError;
    ///
    /// assert_eq!(RuntimeError::NoRuntime.as_label(), "runtime_missing");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::NoRuntime => "runtime_missing",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::NoRuntime => {
                "parallel dispatcher requires a tokio runtime handle".to_string()
            }
        }
    }
}

/// # Failure of a single observer invocation.
///
/// Produced when a dispatcher catches a panic unwinding out of
/// [`Observe::on_event`](crate::Observe::on_event).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObserverError {
    /// The observer panicked while handling an event.
    #[error("observer '{observer}' panicked: {reason}")]
    Panicked {
        /// Name reported by the observer.
        observer: &'static str,
        /// Panic payload rendered as text.
        reason: String,
    },
}

impl ObserverError {
    /// Builds a [`ObserverError::Panicked`] from a caught panic payload.
    ///
    /// `&'static str` and `String` payloads are kept verbatim; anything else
    /// becomes `"unknown panic"`.
    ///
    /// # Example
    /// ```
    /// use fanout::ObserverError;
    ///
    /// let payload = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
    /// let err = ObserverError::from_panic("audit", payload.as_ref());
    /// assert_eq!(err.as_message(), "audit: boom");
    /// ```
    pub fn from_panic(observer: &'static str, payload: &(dyn Any + Send)) -> Self {
        let reason = if let Some(msg) = payload.downcast_ref::<&'static str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic".to_string()
        };
        ObserverError::Panicked { observer, reason }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ObserverError::Panicked { .. } => "observer_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ObserverError::Panicked { observer, reason } => format!("{observer}: {reason}"),
        }
    }

    /// Name of the observer that failed.
    pub fn observer(&self) -> &'static str {
        match self {
            ObserverError::Panicked { observer, .. } => observer,
        }
    }

    /// Emits this failure as a `warn` record.
    pub(crate) fn log(&self) {
        tracing::warn!(
            label = self.as_label(),
            observer = self.observer(),
            reason = %self.as_message(),
            "observer failed while handling event"
        );
    }
}
